use anyhow::{Context, Result};
use std::env as stdenv;
use std::fs;
use std::path::{Path, PathBuf};

/// Process-wide execution context tracked by the interpreter.
///
/// The environment contains:
/// - `current_dir`: the working directory, shown in the prompt and mutated
///   only by `cd`. Spawned stages inherit it from the process itself.
/// - `home`: the value of `HOME` captured at construction, the target of a
///   bare `cd` and of `cd ~`.
///
/// Note: fields are public for simplicity; the rest of the crate treats
/// [`Environment::change_dir`] as the only way to move `current_dir`.
#[derive(Debug, Clone)]
pub struct Environment {
    /// The current working directory for command execution.
    pub current_dir: PathBuf,
    /// Home directory from `HOME`, if the variable was set.
    pub home: Option<PathBuf>,
}

impl Environment {
    /// Capture the current process state into a new `Environment` instance.
    pub fn new() -> Self {
        Self {
            current_dir: stdenv::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            home: stdenv::var_os("HOME").map(PathBuf::from),
        }
    }

    /// Change the working directory of the whole process.
    ///
    /// Relative targets are resolved against `current_dir`, then
    /// canonicalized. On success `current_dir` is updated; on failure the
    /// process stays where it was.
    pub fn change_dir(&mut self, target: &Path) -> Result<()> {
        let resolved = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.current_dir.join(target)
        };

        let canonical = fs::canonicalize(&resolved)
            .with_context(|| format!("can't canonicalize {}", resolved.display()))?;

        stdenv::set_current_dir(&canonical)
            .with_context(|| format!("can't chdir to {}", canonical.display()))?;
        self.current_dir = canonical;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_captures_process_state() {
        // other tests chdir concurrently, so only check shape, not the value
        let env = Environment::new();
        assert!(env.current_dir.is_absolute());
        assert_eq!(env.home, stdenv::var_os("HOME").map(PathBuf::from));
    }

    #[test]
    fn test_change_dir_rejects_missing_path() {
        let mut env = Environment::new();
        let before = env.current_dir.clone();

        let missing = PathBuf::from(format!("/nonexistent_dir_{}", std::process::id()));
        assert!(env.change_dir(&missing).is_err());
        assert_eq!(env.current_dir, before);
    }
}
