pub mod commands;
pub mod manager;

pub use manager::{Builtin, BuiltinManager, Handler, Resolution};
