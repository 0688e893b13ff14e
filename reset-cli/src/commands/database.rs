//! Delete the SQLite database file

use console::style;
use std::fs;
use tracing::info;

use super::{Context, StepOutcome};
use crate::error::{ResetError, Result};

/// Remove the configured database file after confirmation.
///
/// A missing file is not an error. Declining is reported as
/// [`StepOutcome::Declined`]; the caller is expected to stop there.
pub fn run(ctx: &mut Context<'_>) -> Result<StepOutcome> {
    let path = ctx.config.database_path();
    let label = ctx.config.database.display();

    if !path.exists() {
        println!("Database not found: {}", label);
        return Ok(StepOutcome::NotFound);
    }

    if !ctx.gate.confirm(&format!("Delete database '{}'?", label))? {
        println!("{}", style("Operation cancelled.").yellow());
        return Ok(StepOutcome::Declined);
    }

    fs::remove_file(&path).map_err(|e| ResetError::io(&path, e))?;
    info!(path = %path.display(), "database removed");
    println!("{}", style(format!("Database deleted: {}", label)).green());

    Ok(StepOutcome::Done)
}
