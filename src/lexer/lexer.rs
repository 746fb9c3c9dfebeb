use std::mem;
use super::token::{Part, PartKind, Stream};

/// What the caller should do after a character was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Tab while the command word is still being typed.
    Complete,
    /// Tab anywhere else.
    Bell,
    /// Line terminator; the character was not consumed.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRedirect {
    stream: Stream,
    append: bool,
    /// A quote pair was closed in the target, so it is present even if empty.
    quoted: bool,
}

impl PendingRedirect {
    fn part(self, body: String) -> Part {
        Part::new(PartKind::Redirect { stream: self.stream, append: self.append }, body)
    }
}

/// Character-at-a-time tokenizer.
///
/// The lexer never blocks: it is fed one character per keystroke by the line
/// editor and keeps all quote, escape and redirect state between calls.
#[derive(Debug, Default)]
pub struct Lexer {
    parts: Vec<Part>,
    token: String,
    in_single: bool,
    in_double: bool,
    escape: bool,
    redirect: Option<PendingRedirect>,
    has_command: bool,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes a whole line, stopping at the first line terminator.
    pub fn tokenize(line: &str) -> Vec<Part> {
        let mut lexer = Lexer::new();
        for ch in line.chars() {
            if lexer.push(ch) == Step::Done {
                break;
            }
        }
        lexer.finish()
    }

    /// Rebuilds the state reached after typing `line`.
    pub fn replay(line: &str) -> Self {
        let mut lexer = Lexer::new();
        for ch in line.chars() {
            lexer.push(ch);
        }
        lexer
    }

    pub fn push(&mut self, ch: char) -> Step {
        match ch {
            '\t' if self.parts.is_empty() => return Step::Complete,
            '\t' => return Step::Bell,
            '>' if !self.quoted() && !self.escape => self.redirect_op(),
            '\\' if !self.escape => self.escape = true,
            _ if self.escape => self.escaped(ch),
            '\'' if !self.in_double => self.single_quote(),
            '"' if !self.in_single => self.double_quote(),
            ' ' => self.space(),
            '\r' | '\n' => return Step::Done,
            _ => self.token.push(ch),
        }
        Step::Continue
    }

    /// The word being typed.
    pub fn pending(&self) -> &str {
        &self.token
    }

    /// Flushes what is left. A redirect still waiting for its target is
    /// kept with an empty body, so binding it fails instead of vanishing.
    pub fn finish(mut self) -> Vec<Part> {
        let body = mem::take(&mut self.token);
        match self.redirect.take() {
            Some(r) => self.commit(r.part(body)),
            None if !body.is_empty() => self.commit(Part::word(body)),
            None => {}
        }
        self.parts
    }

    fn quoted(&self) -> bool {
        self.in_single || self.in_double
    }

    fn redirect_op(&mut self) {
        if let Some(pending) = self.redirect.as_mut() {
            pending.append = true;
            self.token.clear();
            return;
        }
        let stream = match self.token.chars().last().and_then(Stream::from_id) {
            Some(stream) => {
                self.token.pop();
                stream
            }
            None => Stream::Stdout,
        };
        self.flush_word();
        self.redirect = Some(PendingRedirect { stream, append: false, quoted: false });
    }

    fn escaped(&mut self, ch: char) {
        self.escape = false;
        if self.quoted() {
            if self.in_double && matches!(ch, '$' | '"' | '\\') {
                self.token.push(ch);
            } else {
                self.token.push('\\');
                self.token.push(ch);
            }
            return;
        }
        // Part of a redirect target: `> my\ file`.
        if self.redirect.is_some() {
            self.token.push(ch);
            return;
        }
        self.flush_word();
        self.commit(Part::new(PartKind::Escaped, ch.to_string()));
    }

    fn single_quote(&mut self) {
        self.in_single = !self.in_single;
        if !self.in_single {
            self.close_quote(PartKind::SingleQuoted);
        }
    }

    fn double_quote(&mut self) {
        self.in_double = !self.in_double;
        if !self.in_double {
            self.close_quote(PartKind::DoubleQuoted);
        }
    }

    fn close_quote(&mut self, kind: PartKind) {
        // A quoted redirect target keeps accumulating until a blank.
        if let Some(pending) = self.redirect.as_mut() {
            pending.quoted = true;
            return;
        }
        let body = mem::take(&mut self.token);
        self.commit(Part::new(kind, body));
    }

    fn space(&mut self) {
        if self.quoted() {
            self.token.push(' ');
            return;
        }
        if let Some(r) = self.redirect {
            if r.quoted || !self.token.trim().is_empty() {
                self.redirect = None;
                let body = mem::take(&mut self.token);
                self.commit(r.part(body));
                return;
            }
        }
        self.flush_word();
        let last_is_separator = self.parts.last().is_some_and(Part::is_separator);
        if !self.parts.is_empty() && !last_is_separator {
            self.commit(Part::separator());
        }
    }

    fn flush_word(&mut self) {
        if self.token.trim().is_empty() {
            self.token.clear();
            return;
        }
        let body = mem::take(&mut self.token);
        self.commit(Part::word(body));
    }

    fn commit(&mut self, mut part: Part) {
        if !self.has_command && !part.is_separator() && !part.is_redirect() {
            part.is_command = true;
            self.has_command = true;
        }
        self.parts.push(part);
    }
}
