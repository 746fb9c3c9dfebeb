use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use crate::config::Config;

/// Installs a file logger when the config names a log file.
///
/// The terminal belongs to the session, so nothing is logged there. Failures
/// are returned for the caller to report; the shell runs without a log.
pub fn init(config: &Config) -> io::Result<bool> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(false);
    };
    if config.log_level == LevelFilter::Off {
        return Ok(false);
    }
    install(path, config.log_level)?;
    Ok(true)
}

fn install(path: &Path, level: LevelFilter) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let settings = ConfigBuilder::new()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, settings, file).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    #[test]
    fn test_no_log_file_means_no_logger() {
        assert!(!init(&ConfigLoader::default_config()).unwrap());
    }

    #[test]
    fn test_level_off_skips_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shell.log");
        let mut config = ConfigLoader::default_config();
        config.log_file = Some(path.clone());
        config.log_level = LevelFilter::Off;
        assert!(!init(&config).unwrap());
        assert!(!path.exists());
    }
}
