use std::io::{Read, Write};
use log::{debug, info, warn};
use crate::completion::CommandCompleter;
use crate::environment::Environment;
use crate::error::ExecError;
use crate::executor::path_resolver::PathResolver;
use crate::executor::{Executor, ExecOutcome};
use crate::io::InputHandler;
use crate::prompt::ShellPrompt;

/// The prompt loop: read a line, hand it to the executor, repeat.
pub struct Repl<E: Executor> {
    executor: E,
    env: Environment,
    prompt: ShellPrompt,
}

impl<E: Executor> Repl<E> {
    pub fn new(executor: E, env: Environment, prompt: ShellPrompt) -> Self {
        Repl { executor, env, prompt }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[cfg(test)]
    pub(crate) fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs until `exit` or end of input and returns the status to exit with.
    ///
    /// Command failures are reported and the loop continues; only a failure
    /// to read input or write the prompt ends it early.
    pub fn run<R: Read, W: Write>(&mut self, input: R, out: &mut W, interactive: bool) -> Result<i32, ExecError> {
        let mut input = InputHandler::new(input);
        let mut status = 0;

        loop {
            self.prompt.show_prompt(out)?;

            // PATH may change between lines, so completion is rebuilt each time.
            let completer = CommandCompleter::new(self.executor.command_names(), PathResolver::from_env(&self.env));
            let Some(line) = self.prompt.read_line(&mut input, out, &completer, interactive)? else {
                info!("end of input, status {}", status);
                return Ok(status);
            };
            if line.parts.is_empty() {
                continue;
            }

            debug!("line: {}", line.raw);
            match self.executor.exec(&line, &mut self.env) {
                Ok(ExecOutcome::Code(code)) => status = code,
                Ok(ExecOutcome::Exit(code)) => {
                    info!("exit {}", code);
                    return Ok(code);
                }
                Err(e) => {
                    status = match &e {
                        ExecError::ExitStatus { code, .. } => *code,
                        _ => 1,
                    };
                    if e.is_silent() {
                        info!("{}", e);
                    } else {
                        warn!("{}", e);
                        self.executor.report(&e);
                    }
                }
            }
        }
    }
}
