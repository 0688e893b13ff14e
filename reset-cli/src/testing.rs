//! Test doubles for the prompt and the process runner
//!
//! - [`ScriptedPrompt`] answers confirmations from a fixed list and records
//!   every question it was asked
//! - [`RecordingRunner`] records every command instead of spawning it and
//!   reports a configurable exit status
//!
//! # Example
//!
//! ```rust
//! use reset_cli::testing::{RecordingRunner, ScriptedPrompt};
//! use reset_cli::process::CommandStatus;
//!
//! let prompt = ScriptedPrompt::new([true, false]);
//! let runner = RecordingRunner::new().with_status("migrate", CommandStatus::failure(1));
//! # let _ = (prompt, runner);
//! ```

use std::collections::VecDeque;
use std::io;

use crate::confirm::Prompt;
use crate::error::{ResetError, Result};
use crate::process::{CommandLine, CommandRunner, CommandStatus};

/// Prompt that replays canned answers.
///
/// Running out of answers is reported as end-of-input, the same way a
/// closed stdin would be.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> Result<bool> {
        self.asked.push(message.to_string());
        self.answers.pop_front().ok_or_else(|| {
            ResetError::io(
                "<scripted>",
                io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"),
            )
        })
    }
}

/// Runner that never spawns anything.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Vec<CommandLine>,
    statuses: Vec<(String, CommandStatus)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `status` for any command with an argument equal to `arg`.
    /// Everything else succeeds.
    pub fn with_status(mut self, arg: impl Into<String>, status: CommandStatus) -> Self {
        self.statuses.push((arg.into(), status));
        self
    }

    pub fn commands(&self) -> &[CommandLine] {
        &self.commands
    }

    /// Recorded commands rendered as shell-like strings
    pub fn command_lines(&self) -> Vec<String> {
        self.commands.iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &CommandLine) -> Result<CommandStatus> {
        self.commands.push(command.clone());

        let status = self
            .statuses
            .iter()
            .find(|(arg, _)| command.args.iter().any(|a| a == arg))
            .map(|(_, status)| *status)
            .unwrap_or_else(CommandStatus::success);
        Ok(status)
    }
}
