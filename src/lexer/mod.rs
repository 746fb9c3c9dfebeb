mod editor;
mod lexer;
mod token;

pub use editor::{CommandLine, LineEditor};
pub use lexer::{Lexer, Step};
pub use token::{Part, PartKind, Stream, words};
