use crate::builtin::{self, Internal};
use crate::command::{Expression, ExitSignal};
use crate::env::Environment;
use crate::external;
use crate::parser;
use log::{debug, trace};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};

/// The shell's read-parse-execute loop and its state.
///
/// The interpreter owns the [`Environment`] (working directory, home) and
/// turns each input line into an [`ExitSignal`]: parse, give the
/// internal-command dispatcher first refusal, then hand the expression to
/// the pipeline engine.
///
/// Example
/// ```
/// use pipeshell::{ExitSignal, Interpreter};
/// let mut sh = Interpreter::new();
/// assert_eq!(sh.execute_line("echo hello | wc -c"), ExitSignal::Success);
/// ```
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    /// Create an interpreter rooted in the current process state.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Parse and run one raw input line.
    pub fn execute_line(&mut self, line: &str) -> ExitSignal {
        let expression = parser::parse_command_line(line);
        trace!("parsed {line:?} into {expression:?}");
        self.execute(&expression)
    }

    /// Run one parsed expression: internal commands first, then the engine.
    ///
    /// Every failure is reported on stderr here or at the point it was
    /// detected; the caller only sees the [`ExitSignal`].
    pub fn execute(&mut self, expression: &Expression) -> ExitSignal {
        match builtin::try_handle_internal(expression, &mut self.env) {
            Internal::Exited => return ExitSignal::Exit,
            Internal::DirectoryChanged => return ExitSignal::Success,
            Internal::NotInternal => {}
        }

        match external::run_pipeline(expression) {
            Ok(()) => ExitSignal::Success,
            Err(err) => {
                eprintln!("{err:#}");
                ExitSignal::Failure
            }
        }
    }

    /// The interactive loop: read a line, remember it, run it.
    ///
    /// With `show_prompt` the current directory is shown in green before the
    /// `$ `. Interrupt and end-of-input both end the loop quietly; extra
    /// farewell text here would corrupt scripted output when stdin is a
    /// redirected file.
    pub fn repl(&mut self, show_prompt: bool) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            let prompt = if show_prompt {
                format!("\x1b[32m{}\x1b[39m$ ", self.env.current_dir.display())
            } else {
                String::new()
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    if self.execute_line(&line) == ExitSignal::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    debug!("eof");
                    break;
                }
                Err(err) => {
                    eprintln!("readline error: {err:?}");
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
