use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::{fmt, io};
use log::LevelFilter;

pub const CONFIG_FILE: &str = ".tinyshrc";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// `env.NAME=value` entries, applied over the inherited environment.
    pub env_vars: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "$ ".to_string(),
            log_file: None,
            log_level: LevelFilter::Info,
            env_vars: BTreeMap::new(),
        }
    }

    /// `$HOME/.tinyshrc`, if `HOME` is set.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| Path::new(&home).join(CONFIG_FILE))
    }

    /// Loads the default file. A missing file means defaults; any other
    /// problem is reported once and also falls back to defaults.
    pub fn load_default() -> Config {
        let Some(path) = Self::default_path() else {
            return Self::default_config();
        };
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Self::default_config(),
            Err(e) => {
                eprintln!("tinysh: {}: {}", path.display(), e);
                Self::default_config()
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("Line {}: No '=' found: {}", lineno + 1, line)));
            };
            let key = key.trim();

            match key {
                // The prompt keeps its spacing; everything else is trimmed.
                "prompt" => config.prompt = value.to_string(),
                "log_file" => {
                    let value = value.trim();
                    config.log_file = (!value.is_empty()).then(|| PathBuf::from(value));
                }
                "log_level" => match value.trim().parse::<LevelFilter>() {
                    Ok(level) => config.log_level = level,
                    Err(_) => {
                        return Err(ConfigError::Parse(format!("Line {}: Invalid log level: {}", lineno + 1, value.trim())));
                    }
                },
                k if k.starts_with("env.") && k.len() > 4 => {
                    config.env_vars.insert(k["env.".len()..].to_string(), value.trim().to_string());
                }
                _ => return Err(ConfigError::Parse(format!("Line {}: Unknown key: {}", lineno + 1, key))),
            }
        }
        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", crate::error::describe(e)),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_source_gives_defaults() {
        assert_eq!(ConfigLoader::load_from_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_all_keys() {
        let src = concat!(
            "# shell settings\n",
            "prompt=tinysh> \n",
            "log_file = /tmp/tinysh.log\n",
            "log_level = debug\n",
            "\n",
            "env.EDITOR = vi\n",
            "env.PAGER=less\n",
        );
        let config = ConfigLoader::load_from_str(src).unwrap();
        assert_eq!(config.prompt, "tinysh> ");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/tinysh.log")));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.env_vars.get("EDITOR").map(String::as_str), Some("vi"));
        assert_eq!(config.env_vars.get("PAGER").map(String::as_str), Some("less"));
    }

    #[test]
    fn test_unknown_key_reports_line() {
        let err = ConfigLoader::load_from_str("prompt=$ \nhistory_max=10\n").unwrap_err();
        assert_eq!(err.to_string(), "Parse error: Line 2: Unknown key: history_max");
    }

    #[test]
    fn test_missing_equals_and_bad_level() {
        assert!(matches!(ConfigLoader::load_from_str("prompt"), Err(ConfigError::Parse(_))));
        let err = ConfigLoader::load_from_str("log_level=loud").unwrap_err();
        assert_eq!(err.to_string(), "Parse error: Line 1: Invalid log level: loud");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "log_level=off\n").unwrap();
        assert_eq!(ConfigLoader::load_from_file(&path).unwrap().log_level, LevelFilter::Off);

        let missing = ConfigLoader::load_from_file(dir.path().join("nope"));
        assert!(matches!(missing, Err(ConfigError::Io(ref e)) if e.kind() == io::ErrorKind::NotFound));
    }
}
