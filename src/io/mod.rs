pub mod input;
pub mod terminal;

pub use input::InputHandler;
pub use terminal::{RawMode, stdin_is_terminal};
