pub mod completion;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod io;
pub mod lexer;
pub mod logging;
pub mod prompt;
pub mod repl;
