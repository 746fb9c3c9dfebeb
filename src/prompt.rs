use std::io::{Read, Write};
use crate::completion::Complete;
use crate::error::ExecError;
use crate::io::{InputHandler, RawMode};
use crate::lexer::{CommandLine, LineEditor};

pub struct ShellPrompt {
    prompt: String,
}

impl ShellPrompt {
    pub fn new(prompt: impl Into<String>) -> Self {
        ShellPrompt {
            prompt: prompt.into(),
        }
    }

    pub fn show_prompt<W: Write>(&self, out: &mut W) -> Result<(), ExecError> {
        out.write_all(self.prompt.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Reads one line. The terminal is in raw mode only while this runs,
    /// and only when `interactive` is set.
    pub fn read_line<R: Read, W: Write>(
        &self,
        input: &mut InputHandler<R>,
        out: &mut W,
        completer: &dyn Complete,
        interactive: bool,
    ) -> Result<Option<CommandLine>, ExecError> {
        let _raw = if interactive { Some(RawMode::enter()?) } else { None };
        let line = LineEditor::new(completer, interactive).read_line(input, out)?;
        Ok(line)
    }
}

impl Default for ShellPrompt {
    fn default() -> Self {
        ShellPrompt::new("$ ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Completion;
    use std::io::Cursor;

    struct NoCompletion;

    impl Complete for NoCompletion {
        fn complete(&self, _prefix: &str) -> Option<Completion> {
            None
        }
    }

    #[test]
    fn test_show_prompt_writes_text() {
        let mut out = Vec::new();
        ShellPrompt::default().show_prompt(&mut out).unwrap();
        assert_eq!(out, b"$ ");
    }

    #[test]
    fn test_read_line_without_terminal() {
        let prompt = ShellPrompt::new("> ");
        let mut input = InputHandler::new(Cursor::new(b"pwd\nls\n".to_vec()));
        let mut out = Vec::new();

        let first = prompt.read_line(&mut input, &mut out, &NoCompletion, false).unwrap();
        let second = prompt.read_line(&mut input, &mut out, &NoCompletion, false).unwrap();
        let third = prompt.read_line(&mut input, &mut out, &NoCompletion, false).unwrap();

        assert_eq!(first.map(|l| l.raw), Some("pwd".to_string()));
        assert_eq!(second.map(|l| l.raw), Some("ls".to_string()));
        assert_eq!(third, None);
        assert!(out.is_empty());
    }
}
