//! The reset run from start to finish
//!
//! Steps run strictly in order:
//!
//! 1. delete the database (unless `--skip-db`)
//! 2. sweep migration folders (unless `--skip-clean`)
//! 3. `makemigrations` + `migrate` (always)
//! 4. `pip install -r requirements.txt` (unless `--skip-install`)
//!
//! Declining the database deletion ends the run early without error.
//! Declining the sweep or the install only skips that step.

use console::style;
use tracing::{debug, info_span};

use crate::commands::{clean_migrations, database, install, migrate, Context, StepOutcome};
use crate::config::ResetConfig;
use crate::confirm::Prompt;
use crate::error::Result;
use crate::process::CommandRunner;

/// How a run that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every enabled step ran
    Completed,
    /// The user declined deleting the database; nothing after it ran
    Aborted,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        0
    }
}

pub fn run(
    config: &ResetConfig,
    prompt: &mut dyn Prompt,
    runner: &mut dyn CommandRunner,
) -> Result<Outcome> {
    let _span = info_span!("reset", project = %config.project_dir.display()).entered();
    let mut ctx = Context::new(config, prompt, runner);

    println!();
    println!("{}", style("--- Django Environment Reset ---").cyan());

    if config.skip_db {
        debug!("database reset skipped by flag");
    } else if database::run(&mut ctx)? == StepOutcome::Declined {
        return Ok(Outcome::Aborted);
    }

    if config.skip_clean {
        debug!("migration cleanup skipped by flag");
    } else {
        clean_migrations::run(&mut ctx)?;
    }

    migrate::run(&mut ctx)?;

    if config.skip_install {
        debug!("dependency installation skipped by flag");
    } else {
        install::run(&mut ctx)?;
    }

    println!();
    println!(
        "{}",
        style("Environment reset completed successfully!").green()
    );
    Ok(Outcome::Completed)
}
