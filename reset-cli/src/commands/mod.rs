//! The individual reset steps, in the order the pipeline runs them

pub mod clean_migrations;
pub mod database;
pub mod install;
pub mod migrate;

use crate::config::ResetConfig;
use crate::confirm::{ConfirmationGate, Prompt};
use crate::process::CommandRunner;

/// Shared state handed to every step.
pub struct Context<'a> {
    pub config: &'a ResetConfig,
    pub gate: ConfirmationGate<'a>,
    pub runner: &'a mut dyn CommandRunner,
}

impl<'a> Context<'a> {
    pub fn new(
        config: &'a ResetConfig,
        prompt: &'a mut dyn Prompt,
        runner: &'a mut dyn CommandRunner,
    ) -> Self {
        Self {
            config,
            gate: ConfirmationGate::new(config, prompt),
            runner,
        }
    }
}

/// What a single step ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step did its work
    Done,
    /// Nothing to act on (missing file, no folders)
    NotFound,
    /// The user answered "no"
    Declined,
}
