use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use crate::environment::Environment;

/// Linear PATH search.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    dirs: Vec<PathBuf>,
}

impl PathResolver {
    pub fn new(path: &str) -> Self {
        PathResolver {
            dirs: path
                .split(':')
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .collect(),
        }
    }

    pub fn from_env(env: &Environment) -> Self {
        Self::new(env.path())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Finds the executable `command` names.
    ///
    /// A name containing `/` is taken as a path and not searched for.
    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        if command.is_empty() {
            return None;
        }
        if command.contains('/') {
            let path = Path::new(command);
            return is_executable(path).then(|| path.to_path_buf());
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(command))
            .find(|path| is_executable(path))
    }
}

/// A regular file with at least one execute bit set.
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Executable names in `dir`, sorted. Unreadable directories yield nothing.
pub fn executables(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| is_executable(&entry.path()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    pub(crate) fn make_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_resolve_searches_dirs_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        make_file(second.path(), "tool", 0o755);
        let shadow = make_file(first.path(), "tool", 0o700);

        let path = format!("{}:{}", first.path().display(), second.path().display());
        assert_eq!(PathResolver::new(&path).resolve("tool"), Some(shadow));
    }

    #[test]
    fn test_resolve_skips_non_executables() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        make_file(first.path(), "tool", 0o644);
        let real = make_file(second.path(), "tool", 0o755);

        let path = format!("{}:{}", first.path().display(), second.path().display());
        assert_eq!(PathResolver::new(&path).resolve("tool"), Some(real));
    }

    #[test]
    fn test_resolve_path_with_slash() {
        let dir = TempDir::new().unwrap();
        let script = make_file(dir.path(), "run.sh", 0o755);
        let resolver = PathResolver::new("");
        assert_eq!(resolver.resolve(script.to_str().unwrap()), Some(script.clone()));
        assert_eq!(resolver.resolve("/definitely/not/here"), None);
    }

    #[test]
    fn test_resolve_unknown_and_empty() {
        let dir = TempDir::new().unwrap();
        let resolver = PathResolver::new(dir.path().to_str().unwrap());
        assert_eq!(resolver.resolve("nothing"), None);
        assert_eq!(resolver.resolve(""), None);
    }

    #[test]
    fn test_empty_path_entries_are_dropped() {
        let resolver = PathResolver::new("/bin::/usr/bin:");
        assert_eq!(resolver.dirs(), [PathBuf::from("/bin"), PathBuf::from("/usr/bin")]);
    }

    #[test]
    fn test_executables_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        make_file(dir.path(), "zeta", 0o755);
        make_file(dir.path(), "alpha", 0o755);
        make_file(dir.path(), "notes.txt", 0o644);
        fs::create_dir(dir.path().join("subdir")).unwrap();
        assert_eq!(executables(dir.path()), vec!["alpha", "zeta"]);
    }
}
