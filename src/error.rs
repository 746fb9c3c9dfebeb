use std::fmt;
use std::io;
use nix::errno::Errno;

#[derive(Debug)]
pub enum ExecError {
    CommandNotFound(String),
    Io(io::Error),
    InvalidPath(String),
    RedirectError { path: String, source: io::Error },
    SpawnError { program: String, source: io::Error },
    ExitStatus { program: String, code: i32 },
    NoSuchBuiltin(String),
    Terminal(Errno),
}

impl ExecError {
    /// Errors that only mean "the child failed"; the shell itself is fine.
    pub fn is_silent(&self) -> bool {
        matches!(self, ExecError::ExitStatus { .. })
    }
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::CommandNotFound(cmd) => write!(f, "{}: command not found", cmd),
            ExecError::Io(e) => write!(f, "IO error: {}", describe(e)),
            ExecError::InvalidPath(path) => write!(f, "{}: invalid path", path),
            ExecError::RedirectError { path, source } => write!(f, "{}: {}", path, describe(source)),
            ExecError::SpawnError { program, source } => write!(f, "{}: {}", program, describe(source)),
            ExecError::ExitStatus { program, code } => write!(f, "{}: exited with status {}", program, code),
            ExecError::NoSuchBuiltin(name) => write!(f, "No such builtin command: {}", name),
            ExecError::Terminal(e) => write!(f, "terminal error: {}", e.desc()),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Io(e) => Some(e),
            ExecError::RedirectError { source, .. } => Some(source),
            ExecError::SpawnError { source, .. } => Some(source),
            ExecError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExecError {
    fn from(e: io::Error) -> Self {
        ExecError::Io(e)
    }
}

impl From<Errno> for ExecError {
    fn from(e: Errno) -> Self {
        ExecError::Terminal(e)
    }
}

/// OS error text without the "(os error N)" suffix std appends.
pub fn describe(e: &io::Error) -> String {
    match e.raw_os_error() {
        Some(code) => Errno::from_raw(code).desc().to_string(),
        None => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_strips_os_error_suffix() {
        let e = io::Error::from_raw_os_error(libc::ENOENT);
        assert_eq!(describe(&e), "No such file or directory");
    }

    #[test]
    fn test_redirect_error_message() {
        let e = ExecError::RedirectError {
            path: "/nope/out.txt".to_string(),
            source: io::Error::from_raw_os_error(libc::ENOENT),
        };
        assert_eq!(e.to_string(), "/nope/out.txt: No such file or directory");
    }

    #[test]
    fn test_only_exit_status_is_silent() {
        let failed = ExecError::ExitStatus { program: "false".to_string(), code: 1 };
        assert!(failed.is_silent());
        assert!(!ExecError::CommandNotFound("x".to_string()).is_silent());
    }
}
