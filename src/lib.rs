//! A small interactive shell built around one capability: running a line of
//! the fixed shape `cmd1 [args] [< infile] | cmd2 | ... | cmdN [> outfile] [&]`
//! as a chain of operating-system processes, each stage's standard output
//! piped into the next stage's standard input.
//!
//! A line is parsed into an [`Expression`]; `cd` and `exit` are handled
//! in-process without spawning anything; every other stage becomes a real
//! child process, waited for in spawn order unless the line was marked
//! background with `&`. The main entry point is [`Interpreter`], which
//! drives one line end to end and hosts the interactive loop.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
mod parser;

pub use command::{Command, ExitSignal, Expression};

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the loop API and an example.
pub use interpreter::Interpreter;
