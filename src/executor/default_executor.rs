use std::io::Write;
use log::{debug, info, warn};
use crate::environment::Environment;
use crate::error::ExecError;
use crate::executor::{Executor, ExecOutcome, ExecStatus};
use crate::lexer::{CommandLine, words};
use super::builtin::{BuiltinManager, Resolution, commands};
use super::command::Invocation;
use super::external;
use super::output::{Buffer, Output};
use super::redirect::{Bound, RedirectHandler};

/// In-memory stand-ins for the process streams.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    pub stdout: Buffer,
    pub stderr: Buffer,
}

impl Capture {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout.borrow()).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr.borrow()).into_owned()
    }
}

pub struct DefaultExecutor {
    builtins: BuiltinManager,
    capture: Option<Capture>,
}

impl DefaultExecutor {
    pub fn new() -> Self {
        DefaultExecutor {
            builtins: BuiltinManager::new(),
            capture: None,
        }
    }

    /// Sends unredirected output to memory instead of the terminal.
    pub fn capturing() -> (Self, Capture) {
        let capture = Capture::default();
        let executor = DefaultExecutor {
            builtins: BuiltinManager::new(),
            capture: Some(capture.clone()),
        };
        (executor, capture)
    }

    fn default_outputs(&self) -> (Output, Output) {
        match &self.capture {
            Some(c) => (Output::Memory(c.stdout.clone()), Output::Memory(c.stderr.clone())),
            None => (Output::Stdout, Output::Stderr),
        }
    }
}

impl Default for DefaultExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for DefaultExecutor {
    fn exec(&mut self, line: &CommandLine, env: &mut Environment) -> ExecStatus {
        debug!(
            "parts: {}",
            line.parts.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
        );

        // Words come from the unfiltered parts so a redirect still splits
        // the words around it.
        let args = words(&line.parts);
        let Bound { parts, stdout, stderr } = RedirectHandler::bind(line.parts.clone())?;
        if args.is_empty() {
            return Ok(ExecOutcome::Code(0));
        }

        let (default_out, default_err) = self.default_outputs();
        let mut inv = Invocation {
            raw: &line.raw,
            parts,
            args,
            stdout: stdout.map(Output::File).unwrap_or(default_out),
            stderr: stderr.map(Output::File).unwrap_or(default_err),
            resolved: None,
        };

        match self.builtins.lookup(inv.name(), env) {
            Resolution::Builtin => {
                debug!("builtin: {}", inv.name());
                self.builtins.execute(&mut inv, env)
            }
            Resolution::Executable(path) => {
                info!("exec: {} -> {}", inv.name(), path.display());
                inv.resolved = Some(path);
                external::run(&mut inv, env)
            }
            Resolution::NotFound => {
                info!("not found: {}", inv.name());
                commands::command_not_found(&mut inv)
            }
        }
    }

    fn report(&mut self, error: &ExecError) {
        let (_, mut stderr) = self.default_outputs();
        if let Err(e) = writeln!(stderr, "{}", error) {
            warn!("cannot report {:?}: {}", error, e);
        }
    }

    fn command_names(&self) -> Vec<&'static str> {
        self.builtins.names()
    }
}
