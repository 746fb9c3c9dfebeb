use std::path::PathBuf;
use crate::lexer::Part;
use super::output::Output;

/// Everything one command execution sees. Dropped before the next prompt,
/// which closes any redirect targets.
pub struct Invocation<'a> {
    pub raw: &'a str,
    /// Parts with redirects removed.
    pub parts: Vec<Part>,
    /// Shell words; `args[0]` is the command name.
    pub args: Vec<String>,
    pub stdout: Output,
    pub stderr: Output,
    pub resolved: Option<PathBuf>,
}

impl Invocation<'_> {
    pub fn name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }
}
