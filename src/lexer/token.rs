use std::fmt;

/// Output stream a redirect rebinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout, // 1
    Stderr, // 2
}

impl Stream {
    pub fn from_id(id: char) -> Option<Stream> {
        match id {
            '1' => Some(Stream::Stdout),
            '2' => Some(Stream::Stderr),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Stream::Stdout => 1,
            Stream::Stderr => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartKind {
    Word,          // unquoted text
    SingleQuoted,  // '...'
    DoubleQuoted,  // "..."
    Escaped,       // \c outside quotes, exactly one char
    Separator,     // run of unquoted blanks
    Redirect { stream: Stream, append: bool },
}

/// One lexical unit of a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub body: String,
    pub kind: PartKind,
    pub is_command: bool,
}

impl Part {
    pub fn new(kind: PartKind, body: impl Into<String>) -> Self {
        Part {
            body: body.into(),
            kind,
            is_command: false,
        }
    }

    pub fn word(body: impl Into<String>) -> Self {
        Part::new(PartKind::Word, body)
    }

    pub fn separator() -> Self {
        Part::new(PartKind::Separator, " ")
    }

    pub fn is_separator(&self) -> bool {
        self.kind == PartKind::Separator
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.kind, PartKind::Redirect { .. })
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_command {
            return write!(f, "Cmd({})", self.body);
        }
        match &self.kind {
            PartKind::Word => write!(f, "Part({})", self.body),
            PartKind::SingleQuoted => write!(f, "'({})", self.body),
            PartKind::DoubleQuoted => write!(f, "\"({})", self.body),
            PartKind::Escaped => write!(f, "\\({})", self.body),
            PartKind::Separator => write!(f, "SEP"),
            PartKind::Redirect { stream, append } => {
                let op = if *append { ">>" } else { ">" };
                write!(f, "{}{}({})", stream.id(), op, self.body)
            }
        }
    }
}

/// Groups parts into shell words.
///
/// Separators and redirect targets end a word. Adjacent parts join into one
/// word, except two plain words in a row, which stay apart.
pub fn words(parts: &[Part]) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut open = false;
    let mut last_plain = false;

    for part in parts {
        match part.kind {
            PartKind::Separator | PartKind::Redirect { .. } => {
                open = false;
                last_plain = false;
            }
            _ => {
                let plain = part.kind == PartKind::Word;
                match words.last_mut() {
                    Some(word) if open && !(plain && last_plain) => word.push_str(&part.body),
                    _ => words.push(part.body.clone()),
                }
                open = true;
                last_plain = plain;
            }
        }
    }
    words
}
