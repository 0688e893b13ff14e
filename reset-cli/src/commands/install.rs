//! Install dependencies from the requirements manifest with pip

use console::style;
use tracing::info;

use super::{Context, StepOutcome};
use crate::config::ResetConfig;
use crate::error::{ResetError, Result};
use crate::process::{run_checked, CommandLine};

/// `<python> -m pip install -r <requirements>`, run from the project root.
pub fn command(config: &ResetConfig) -> CommandLine {
    let requirements = config.requirements.to_string_lossy();
    CommandLine::new(
        &config.python,
        ["-m", "pip", "install", "-r", &*requirements],
        &config.project_dir,
    )
}

/// Missing manifest and a "no" answer both skip quietly; only a failed
/// install is fatal.
pub fn run(ctx: &mut Context<'_>) -> Result<StepOutcome> {
    let path = ctx.config.requirements_path();
    let label = ctx.config.requirements.display();

    let present = path.exists();
    let outcome = if !present {
        StepOutcome::NotFound
    } else if ctx
        .gate
        .confirm(&format!("Install dependencies from '{}'?", label))?
    {
        StepOutcome::Done
    } else {
        StepOutcome::Declined
    };

    if outcome != StepOutcome::Done {
        info!(present, "dependency installation skipped");
        println!("File '{}' not found or installation skipped.", label);
        return Ok(outcome);
    }

    run_checked(&mut *ctx.runner, &command(ctx.config))
        .map_err(|e| ResetError::InstallFailed(Box::new(e)))?;
    println!("{}", style("Dependencies installed successfully.").green());
    Ok(StepOutcome::Done)
}
