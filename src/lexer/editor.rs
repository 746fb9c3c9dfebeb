use std::io::{self, Read, Write};
use crate::completion::Complete;
use crate::io::InputHandler;
use super::lexer::{Lexer, Step};
use super::token::Part;

const EOT: char = '\u{4}';
const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';
const ESC: char = '\u{1b}';
const BELL: &str = "\u{7}";

/// One submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// The line as typed, trimmed.
    pub raw: String,
    pub parts: Vec<Part>,
}

impl CommandLine {
    pub fn parse(line: &str) -> Self {
        let raw = line.trim().to_string();
        let parts = Lexer::tokenize(&raw);
        CommandLine { raw, parts }
    }
}

/// Drives the lexer from keystrokes and echoes what was accepted.
///
/// With `echo` off (input is not a terminal) nothing is written back.
pub struct LineEditor<'a> {
    completer: &'a dyn Complete,
    echo: bool,
}

impl<'a> LineEditor<'a> {
    pub fn new(completer: &'a dyn Complete, echo: bool) -> Self {
        LineEditor { completer, echo }
    }

    /// Reads one line. `None` when input ends before anything was typed.
    pub fn read_line<R: Read, W: Write>(
        &self,
        input: &mut InputHandler<R>,
        out: &mut W,
    ) -> io::Result<Option<CommandLine>> {
        let mut lexer = Lexer::new();
        let mut raw = String::new();

        loop {
            let Some(ch) = input.read_char()? else {
                if raw.trim().is_empty() {
                    return Ok(None);
                }
                break;
            };

            match ch {
                EOT if raw.is_empty() => {
                    self.write(out, "\n")?;
                    return Ok(None);
                }
                EOT => continue,
                BACKSPACE | DELETE => {
                    if raw.pop().is_some() {
                        lexer = Lexer::replay(&raw);
                        self.write(out, "\u{8} \u{8}")?;
                    }
                    continue;
                }
                ESC => {
                    skip_escape_sequence(input)?;
                    continue;
                }
                _ => {}
            }

            match lexer.push(ch) {
                Step::Continue => {
                    raw.push(ch);
                    let mut utf8 = [0u8; 4];
                    self.write(out, ch.encode_utf8(&mut utf8))?;
                }
                Step::Complete => match self.completer.complete(lexer.pending()) {
                    Some(completion) => {
                        let insert = format!("{} ", completion.suffix);
                        for c in insert.chars() {
                            lexer.push(c);
                        }
                        raw.push_str(&insert);
                        self.write(out, &insert)?;
                    }
                    None => self.write(out, BELL)?,
                },
                Step::Bell => self.write(out, BELL)?,
                Step::Done => {
                    self.write(out, "\n")?;
                    break;
                }
            }
        }

        Ok(Some(CommandLine {
            raw: raw.trim().to_string(),
            parts: lexer.finish(),
        }))
    }

    fn write<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        if self.echo {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Drops a CSI sequence such as an arrow key (`ESC [ A`).
fn skip_escape_sequence<R: Read>(input: &mut InputHandler<R>) -> io::Result<()> {
    if input.read_char()? != Some('[') {
        return Ok(());
    }
    while let Some(ch) = input.read_char()? {
        if ('\u{40}'..='\u{7e}').contains(&ch) {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Completion;
    use crate::lexer::{PartKind, words};
    use std::io::Cursor;

    struct Fixed;

    impl Complete for Fixed {
        fn complete(&self, prefix: &str) -> Option<Completion> {
            "echo".strip_prefix(prefix).map(|suffix| Completion {
                name: "echo".to_string(),
                suffix: suffix.to_string(),
            })
        }
    }

    fn read(keys: &str, echo: bool) -> (Option<CommandLine>, String) {
        let mut input = InputHandler::new(Cursor::new(keys.as_bytes().to_vec()));
        let mut out = Vec::new();
        let line = LineEditor::new(&Fixed, echo).read_line(&mut input, &mut out).unwrap();
        (line, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_plain_line() {
        let (line, out) = read("echo hi\n", true);
        let line = line.unwrap();
        assert_eq!(line.raw, "echo hi");
        assert_eq!(words(&line.parts), vec!["echo", "hi"]);
        assert_eq!(out, "echo hi\n");
    }

    #[test]
    fn test_tab_completes_command() {
        let (line, out) = read("ec\thi\r", true);
        let line = line.unwrap();
        assert_eq!(line.raw, "echo hi");
        assert!(line.parts[0].is_command);
        assert_eq!(words(&line.parts), vec!["echo", "hi"]);
        assert_eq!(out, "echo hi\n");
    }

    #[test]
    fn test_tab_without_match_rings_bell() {
        let (line, out) = read("xy\t\n", true);
        assert_eq!(line.unwrap().raw, "xy");
        assert_eq!(out, "xy\u{7}\n");
    }

    #[test]
    fn test_tab_after_command_word_rings_bell() {
        let (line, out) = read("echo a\t\n", true);
        assert_eq!(line.unwrap().raw, "echo a");
        assert_eq!(out, "echo a\u{7}\n");
    }

    #[test]
    fn test_backspace_replays_state() {
        let (line, _) = read("echo 'a\u{7f}\u{7f}b\n", false);
        let line = line.unwrap();
        assert_eq!(line.raw, "echo b");
        assert_eq!(line.parts.last().map(|p| &p.kind), Some(&PartKind::Word));
    }

    #[test]
    fn test_backspace_on_empty_line_is_ignored() {
        let (line, out) = read("\u{7f}pwd\n", true);
        assert_eq!(line.unwrap().raw, "pwd");
        assert_eq!(out, "pwd\n");
    }

    #[test]
    fn test_ctrl_d_on_empty_line_ends_input() {
        let (line, _) = read("\u{4}", false);
        assert_eq!(line, None);
    }

    #[test]
    fn test_eof_after_partial_line_submits_it() {
        let (line, _) = read("pwd", false);
        assert_eq!(line.unwrap().raw, "pwd");
    }

    #[test]
    fn test_eof_without_input() {
        assert_eq!(read("", false).0, None);
    }

    #[test]
    fn test_arrow_keys_are_swallowed() {
        let (line, _) = read("pw\u{1b}[Ad\n", false);
        assert_eq!(line.unwrap().raw, "pwd");
    }

    #[test]
    fn test_no_echo_when_not_interactive() {
        let (_, out) = read("ec\t\n", false);
        assert_eq!(out, "");
    }

    #[test]
    fn test_parse_trims_raw_text() {
        let line = CommandLine::parse("  echo  hi  \n");
        assert_eq!(line.raw, "echo  hi");
        assert_eq!(words(&line.parts), vec!["echo", "hi"]);
    }
}
