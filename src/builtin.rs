use crate::command::Expression;
use crate::env::Environment;
use anyhow::{Result, anyhow};
use argh::{EarlyExit, FromArgs};
use log::debug;
use std::io::{self, Write};
use std::path::PathBuf;

/// What the dispatcher did with an [`Expression`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Internal {
    /// No internal command found; the pipeline engine should run it.
    NotInternal,
    /// A `cd` ran in-process (successfully or not); nothing is left to do.
    DirectoryChanged,
    /// An `exit` token was seen; the caller must terminate the shell.
    Exited,
}

#[derive(FromArgs)]
/// Change the current working directory.
/// If no target is provided, changes to the directory named by the HOME
/// environment variable; a bare `~` does the same.
struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory
    target: Option<String>,
}

impl Cd {
    fn execute(self, env: &mut Environment) -> Result<()> {
        let target = match self.target.as_deref() {
            None | Some("~") => env
                .home
                .clone()
                .ok_or_else(|| anyhow!("no target and HOME not set"))?,
            Some(path) => PathBuf::from(path),
        };
        env.change_dir(&target)
    }
}

/// Handle the commands the shell must not spawn a process for.
///
/// `exit` wins over everything else: any word of any stage equal to `exit`
/// ends the shell, even on a line that could never run. After that, `cd` is
/// recognized only as the first word of the first stage, and every `cd`
/// outcome, bad usage included, counts as fully handled.
pub(crate) fn try_handle_internal(expression: &Expression, env: &mut Environment) -> Internal {
    for command in &expression.commands {
        for part in &command.parts {
            if part == "exit" {
                debug!("exit token found, leaving the loop");
                println!("Bye!");
                let _ = io::stdout().flush();
                return Internal::Exited;
            }
        }
    }

    let first = match expression.commands.first() {
        Some(command) => command,
        None => return Internal::NotInternal,
    };
    if first.parts.first().map(String::as_str) != Some("cd") {
        return Internal::NotInternal;
    }

    let args: Vec<&str> = first.parts[1..].iter().map(String::as_str).collect();
    match Cd::from_args(&["cd"], &args) {
        Ok(cd) => {
            if let Err(err) = cd.execute(env) {
                eprintln!("cd: {err:#}");
            }
        }
        // argh renders both usage errors and --help text through EarlyExit
        Err(EarlyExit { output, status }) => {
            if status.is_err() {
                eprintln!("{output}");
            } else {
                println!("{output}");
            }
        }
    }
    Internal::DirectoryChanged
}
