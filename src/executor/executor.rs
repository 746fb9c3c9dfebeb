use crate::environment::Environment;
use crate::error::ExecError;
use crate::lexer::CommandLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The command finished; the loop goes on.
    Code(i32),
    /// The shell should stop with this status.
    Exit(i32),
}

pub type ExecStatus = Result<ExecOutcome, ExecError>;

pub trait Executor {
    fn exec(&mut self, line: &CommandLine, env: &mut Environment) -> ExecStatus;

    /// Tells the user about a command that could not run.
    fn report(&mut self, error: &ExecError) {
        eprintln!("{}", error);
    }

    /// Names offered to tab completion before PATH entries.
    fn command_names(&self) -> Vec<&'static str> {
        Vec::new()
    }
}
