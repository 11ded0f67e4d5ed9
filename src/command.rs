use std::path::PathBuf;

/// One pipeline stage: the program name followed by its arguments, in order.
///
/// Invariant: non-empty by the time it is executed. The parser can still
/// produce an empty `Command` (a blank segment between two pipes); that is
/// reported as a bad command when the stage is reached, not as a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// `parts[0]` is the program, the rest are passed to it as arguments.
    pub parts: Vec<String>,
}

/// A fully parsed input line.
///
/// `commands` holds the pipeline stages left to right, upstream to
/// downstream. The redirect paths are stage-scoped: `input_from_file` applies
/// only to the first stage's standard input and `output_to_file` only to the
/// last stage's standard output; interior stages are always connected
/// pipe-to-pipe.
///
/// An `Expression` owns no OS resources. File handles and child processes
/// belong to the engine for the duration of one execution, after which the
/// expression is discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    pub commands: Vec<Command>,
    pub input_from_file: Option<PathBuf>,
    pub output_to_file: Option<PathBuf>,
    /// When set, the engine does not wait for the spawned chain to finish.
    pub background: bool,
}

/// Outcome of running one input line, driving the caller's loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    /// The line ran; the loop reads the next one.
    Success,
    /// The line failed and the failure was reported; the loop keeps going.
    Failure,
    /// An `exit` token was seen; the shell terminates.
    Exit,
}
