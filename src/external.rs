use crate::command::{Command, Expression};
use anyhow::{Context, Result, bail};
use log::{debug, error};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::process::{Child, Stdio};

/// Run every stage of `expression` as an external process, the standard
/// output of each interior stage piped into the next stage's standard input.
///
/// Stages are spawned in pipeline order. Each stage's stdin comes from the
/// upstream descriptor: the shell's own stdin, the opened input file, or the
/// previous stage's pipe read end. That read end is moved exactly once, and
/// `std::process` closes the parent's copies of both pipe ends at spawn, so
/// no stray write end survives to keep a downstream reader from seeing EOF.
///
/// Foreground pipelines are waited for stage by stage in spawn order.
/// Background pipelines return as soon as the chain is running; the children
/// are left to the OS.
///
/// Errors fail the whole run: an empty expression, an input file that cannot
/// be opened (nothing is spawned), or an output file that already exists
/// (the last stage is not spawned; the stages already running are still
/// reaped). A stage that cannot be invoked is only reported: its siblings
/// run on, and its downstream neighbor reads EOF.
pub(crate) fn run_pipeline(expression: &Expression) -> Result<()> {
    let last = match expression.commands.len().checked_sub(1) {
        Some(last) => last,
        None => bail!("no input command was given"),
    };

    // The initial upstream descriptor. `None` means the shell's own stdin,
    // inherited by the first stage.
    let mut upstream: Option<Stdio> = match &expression.input_from_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("can't open {} for input", path.display()))?;
            Some(Stdio::from(file))
        }
        None => None,
    };

    let mut children: Vec<(usize, Child)> = Vec::with_capacity(expression.commands.len());
    let mut open_error = None;

    for (i, command) in expression.commands.iter().enumerate() {
        let stdin = upstream.take().unwrap_or_else(Stdio::inherit);

        let stdout = if i != last {
            Stdio::piped()
        } else if let Some(path) = &expression.output_to_file {
            match exclusive_create(path)
                .with_context(|| format!("can't open {} for output", path.display()))
            {
                Ok(file) => Stdio::from(file),
                Err(err) => {
                    // breaking drops `stdin`, so the running stages write
                    // into a closed pipe instead of one nobody will read
                    open_error = Some(err);
                    break;
                }
            }
        } else {
            Stdio::inherit()
        };

        match spawn_stage(command, stdin, stdout) {
            Ok(mut child) => {
                debug!("stage {i} [{}] is pid {}", command.parts.join(" "), child.id());
                if i != last {
                    upstream = child.stdout.take().map(Stdio::from);
                }
                children.push((i, child));
            }
            Err(err) if is_resource_exhaustion(&err) => {
                // no pipe or process table space left; the spawn loop cannot
                // safely continue
                eprintln!("can't spawn stage {i}: {err}");
                std::process::exit(1);
            }
            Err(err) => {
                eprintln!(
                    "encountered bad command: {}: {err}",
                    command.parts.join(" ")
                );
                if i != last {
                    // the dead stage writes nothing; its reader sees EOF at once
                    upstream = Some(Stdio::null());
                }
            }
        }
    }

    if expression.background {
        debug!(
            "background pipeline, leaving {} children to the OS",
            children.len()
        );
    } else {
        for (i, mut child) in children {
            if child.id() == 0 {
                // every recorded stage must have a real pid
                error!("stage {i} recorded pid 0, skipping its wait");
                continue;
            }
            match child.wait() {
                Ok(status) => debug!("stage {i} (pid {}) exited: {status}", child.id()),
                Err(err) => eprintln!("can't wait for stage {i}: {err}"),
            }
        }
    }

    match open_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Launch a single stage with its standard streams remapped.
///
/// `parts[0]` is the program (resolved through PATH by the OS), the rest is
/// its argv. The caller decides what the two `Stdio`s are; standard error is
/// always inherited from the shell.
fn spawn_stage(command: &Command, stdin: Stdio, stdout: Stdio) -> io::Result<Child> {
    let (program, args) = command
        .parts
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
    std::process::Command::new(program)
        .args(args)
        .stdin(stdin)
        .stdout(stdout)
        .spawn()
}

/// Open `path` for the `>` redirect. The create is exclusive: a file that
/// already exists fails the open and is never truncated or overwritten.
fn exclusive_create(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

// EAGAIN and ENOMEM from fork or pipe; anything else is a per-stage problem.
fn is_resource_exhaustion(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory
    )
}
