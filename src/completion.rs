use log::debug;
use crate::executor::path_resolver::{PathResolver, executables};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub name: String,
    /// Text still missing after the typed prefix.
    pub suffix: String,
}

pub trait Complete {
    fn complete(&self, prefix: &str) -> Option<Completion>;
}

/// Completes command names: builtins first, then PATH executables.
///
/// Ties are broken lexicographically, builtin names before directories and
/// directories in PATH order. Directories are listed afresh on every call.
pub struct CommandCompleter {
    builtins: Vec<&'static str>,
    resolver: PathResolver,
}

impl CommandCompleter {
    pub fn new(builtins: impl IntoIterator<Item = &'static str>, resolver: PathResolver) -> Self {
        let mut builtins: Vec<&'static str> = builtins.into_iter().collect();
        builtins.sort_unstable();
        CommandCompleter { builtins, resolver }
    }

    fn find(&self, prefix: &str) -> Option<String> {
        if let Some(name) = self.builtins.iter().find(|name| name.starts_with(prefix)) {
            return Some(name.to_string());
        }
        self.resolver
            .dirs()
            .iter()
            .find_map(|dir| executables(dir).into_iter().find(|name| name.starts_with(prefix)))
    }
}

impl Complete for CommandCompleter {
    fn complete(&self, prefix: &str) -> Option<Completion> {
        if prefix.is_empty() {
            return None;
        }
        let Some(name) = self.find(prefix) else {
            debug!("no completion for {:?}", prefix);
            return None;
        };
        debug!("completed {:?} to {:?}", prefix, name);
        let suffix = name[prefix.len()..].to_string();
        Some(Completion { name, suffix })
    }
}
