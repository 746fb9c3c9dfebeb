mod command;
mod default_executor;
mod executor;
mod external;
mod output;
mod redirect;
pub mod builtin;
pub mod path_resolver;


pub use command::Invocation;
pub use default_executor::{Capture, DefaultExecutor};
pub use executor::{Executor, ExecOutcome, ExecStatus};
pub use output::{Buffer, Output};
pub use redirect::{Bound, RedirectHandler};
