//! Error type shared by every reset step

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a reset run.
///
/// A declined database deletion is not an error: it is reported as
/// [`Outcome::Aborted`](crate::pipeline::Outcome::Aborted) and exits cleanly.
#[derive(Debug, Error)]
pub enum ResetError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read confirmation: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Error while applying migrations.")]
    MigrationsFailed(#[source] Box<ResetError>),

    #[error("Error while installing dependencies.")]
    InstallFailed(#[source] Box<ResetError>),
}

impl ResetError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ResetError>;
