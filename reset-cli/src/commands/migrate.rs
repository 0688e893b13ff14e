//! Regenerate and apply migrations through `manage.py`

use console::style;

use super::{Context, StepOutcome};
use crate::config::{ResetConfig, MANAGE_SCRIPT};
use crate::error::{ResetError, Result};
use crate::process::{run_checked, CommandLine};

/// `makemigrations` followed by `migrate`, in that order.
pub fn commands(config: &ResetConfig) -> [CommandLine; 2] {
    ["makemigrations", "migrate"]
        .map(|sub| CommandLine::new(&config.python, [MANAGE_SCRIPT, sub], &config.project_dir))
}

/// Always runs. The first failing command aborts the step.
pub fn run(ctx: &mut Context<'_>) -> Result<StepOutcome> {
    for command in commands(ctx.config) {
        run_checked(&mut *ctx.runner, &command)
            .map_err(|e| ResetError::MigrationsFailed(Box::new(e)))?;
    }

    println!("{}", style("Migrations applied successfully.").green());
    Ok(StepOutcome::Done)
}
