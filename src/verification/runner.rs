//! External command execution.

use crate::error::{Result, VerifyError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A program plus its arguments. No shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs a command to completion and reports success or failure.
///
/// The pipeline only depends on this seam, so a timeout or retry wrapper can
/// be layered on without touching step sequencing.
pub trait CommandRunner {
    /// # Errors
    /// Returns [`VerifyError::Spawn`] if the program could not be started and
    /// [`VerifyError::CommandFailed`] if it exited unsuccessfully.
    fn run(&self, cmd: &CommandSpec) -> Result<()>;
}

/// Spawns real processes that inherit this process's stdio.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    #[must_use]
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<()> {
        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .current_dir(&self.cwd)
            .status()
            .map_err(|source| {
                tracing::warn!(program = %cmd.program, error = %source, "failed to spawn");
                VerifyError::Spawn {
                    program: cmd.program.clone(),
                    source,
                }
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(VerifyError::CommandFailed {
                command: cmd.to_string(),
                code: status.code(),
            })
        }
    }
}
