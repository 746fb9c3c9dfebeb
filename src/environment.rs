use std::collections::HashMap;
use std::ffi::OsString;
use log::debug;

/// Variables shared by every command of the session.
///
/// Only startup and `cd` (which updates `PWD`) write to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        let mut env = Environment::from_os_vars(std::env::vars_os());

        // The launch directory seeds PWD, whatever the parent exported.
        if let Ok(cwd) = std::env::current_dir() {
            env.set("PWD", &cwd.to_string_lossy());
        }
        env
    }

    /// Keeps the pairs that are valid UTF-8; the rest are skipped.
    pub fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let vars = vars
            .into_iter()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (k, _) => {
                    debug!("skipping non UTF-8 variable {:?}", k);
                    None
                }
            })
            .collect();
        Environment { vars }
    }

    /// An environment holding exactly `vars`, detached from the process.
    pub fn with_vars<'a>(vars: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Environment {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    pub fn pwd(&self) -> &str {
        self.get("PWD").unwrap_or("")
    }

    pub fn home(&self) -> &str {
        self.get("HOME").unwrap_or("")
    }

    pub fn path(&self) -> &str {
        self.get("PATH").unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
