//! External command execution

use console::style;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::error::{ResetError, Result};

/// A program and its arguments, run from a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl AsRef<Path>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// How a finished command exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands to completion.
pub trait CommandRunner {
    /// Run `command`, returning its exit status. Errors only when the
    /// command could not be started at all.
    fn run(&mut self, command: &CommandLine) -> Result<CommandStatus>;
}

/// Run `command` and turn a non-zero exit into an error.
pub fn run_checked(runner: &mut dyn CommandRunner, command: &CommandLine) -> Result<()> {
    let status = runner.run(command)?;
    if status.is_success() {
        return Ok(());
    }

    debug!(command = %command, code = ?status.code, "command failed");
    Err(ResetError::CommandFailed {
        command: command.to_string(),
        code: status.code,
    })
}

/// Spawns real child processes that share this terminal.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &CommandLine) -> Result<CommandStatus> {
        println!();
        println!("{}", style(format!("→ Executing: {}", command)).blue());
        debug!(cwd = %command.cwd.display(), "spawning child process");

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .status()
            .map_err(|source| ResetError::Spawn {
                command: command.to_string(),
                source,
            })?;

        debug!(command = %command, code = ?status.code(), "child process exited");
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}
