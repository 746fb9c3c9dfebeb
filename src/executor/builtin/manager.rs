use std::collections::BTreeMap;
use std::path::PathBuf;
use crate::environment::Environment;
use crate::error::ExecError;
use crate::executor::{ExecStatus, Invocation};
use crate::executor::path_resolver::PathResolver;
use super::commands;

/// Signature every builtin shares. The manager is passed along so `type`
/// can tell builtins apart from executables.
pub type Handler = fn(&mut Invocation<'_>, &mut Environment, &BuiltinManager) -> ExecStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Echo,
    Exit,
    Pwd,
    Type,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [Builtin::Cd, Builtin::Echo, Builtin::Exit, Builtin::Pwd, Builtin::Type];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Echo => "echo",
            Builtin::Exit => "exit",
            Builtin::Pwd => "pwd",
            Builtin::Type => "type",
        }
    }

    fn handler(self) -> Handler {
        match self {
            Builtin::Cd => commands::cd,
            Builtin::Echo => commands::echo,
            Builtin::Exit => commands::exit,
            Builtin::Pwd => commands::pwd,
            Builtin::Type => commands::type_,
        }
    }
}

/// How a command name resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Builtin,
    Executable(PathBuf),
    NotFound,
}

pub struct BuiltinManager {
    commands: BTreeMap<&'static str, Handler>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: BTreeMap::new(),
        };
        for builtin in Builtin::ALL {
            mgr.register(builtin);
        }
        mgr
    }

    pub fn register(&mut self, builtin: Builtin) {
        self.commands.insert(builtin.name(), builtin.handler());
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names in lexicographic order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn execute(&self, inv: &mut Invocation<'_>, env: &mut Environment) -> ExecStatus {
        let Some(handler) = self.commands.get(inv.name()).copied() else {
            return Err(ExecError::NoSuchBuiltin(inv.name().to_string()));
        };
        handler(inv, env, self)
    }

    /// Builtins shadow PATH; PATH is read from `env` on every call.
    pub fn lookup(&self, name: &str, env: &Environment) -> Resolution {
        if self.is_builtin(name) {
            return Resolution::Builtin;
        }
        match PathResolver::from_env(env).resolve(name) {
            Some(path) => Resolution::Executable(path),
            None => Resolution::NotFound,
        }
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Output;
    use crate::executor::path_resolver::tests::make_file;
    use tempfile::TempDir;

    #[test]
    fn test_all_builtins_registered() {
        let mgr = BuiltinManager::new();
        assert_eq!(mgr.names(), vec!["cd", "echo", "exit", "pwd", "type"]);
        assert!(mgr.is_builtin("type"));
        assert!(!mgr.is_builtin("ls"));
    }

    #[test]
    fn test_lookup_prefers_builtins() {
        let dir = TempDir::new().unwrap();
        make_file(dir.path(), "echo", 0o755);
        let tool = make_file(dir.path(), "tool", 0o755);
        let env = Environment::with_vars([("PATH", dir.path().to_str().unwrap())]);

        let mgr = BuiltinManager::new();
        assert_eq!(mgr.lookup("echo", &env), Resolution::Builtin);
        assert_eq!(mgr.lookup("tool", &env), Resolution::Executable(tool));
        assert_eq!(mgr.lookup("missing", &env), Resolution::NotFound);
    }

    #[test]
    fn test_execute_unknown_name() {
        let mgr = BuiltinManager::new();
        let mut env = Environment::with_vars([("HOME", "/")]);
        let mut inv = Invocation {
            raw: "ls",
            parts: Vec::new(),
            args: vec!["ls".to_string()],
            stdout: Output::Stdout,
            stderr: Output::Stderr,
            resolved: None,
        };
        let err = mgr.execute(&mut inv, &mut env).unwrap_err();
        assert_eq!(err.to_string(), "No such builtin command: ls");
    }
}
