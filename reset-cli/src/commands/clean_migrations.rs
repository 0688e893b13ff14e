//! Clear generated migration files from every Django app

use console::style;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::{Context, StepOutcome};
use crate::error::{ResetError, Result};

const MIGRATIONS_DIR: &str = "migrations";
/// Package marker that must survive every sweep
pub const MARKER_FILE: &str = "__init__.py";
const BYTECODE_CACHE_DIR: &str = "__pycache__";

/// Directory names that hold installed dependencies rather than project code
pub const DEPENDENCY_ENV_DIRS: &[&str] = &[".venv", "venv", "site-packages"];

pub fn run(ctx: &mut Context<'_>) -> Result<StepOutcome> {
    let root = ctx.config.project_dir.as_path();
    let folders = find_migration_dirs(root);

    if folders.is_empty() {
        println!("No migration folders found.");
        return Ok(StepOutcome::NotFound);
    }

    println!("Found migration folders:");
    for folder in &folders {
        println!(" - {}", relative(root, folder).display());
    }

    let message = format!("Remove all migration files (except {})?", MARKER_FILE);
    if !ctx.gate.confirm(&message)? {
        println!("{}", style("Migration cleanup cancelled.").yellow());
        return Ok(StepOutcome::Declined);
    }

    let mut removed = 0;
    for folder in &folders {
        removed += clear_migration_dir(root, folder)?.len();
        remove_bytecode_caches(folder);
    }

    info!(folders = folders.len(), files = removed, "migration files cleaned");
    println!("{}", style("Migration files cleaned.").green());
    Ok(StepOutcome::Done)
}

/// Find every `migrations` package below `root`, skipping dependency
/// environments entirely. Results are sorted by path.
pub fn find_migration_dirs(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_dependency_env(entry))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == OsStr::new(MIGRATIONS_DIR))
        .filter(|e| e.path().join(MARKER_FILE).is_file())
        .map(DirEntry::into_path)
        .collect()
}

fn is_dependency_env(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| DEPENDENCY_ENV_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Delete every Python source file under `folder` except package markers.
///
/// Returns the deleted paths.
pub fn clear_migration_dir(root: &Path, folder: &Path) -> Result<Vec<PathBuf>> {
    let doomed: Vec<PathBuf> = WalkDir::new(folder)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension() == Some(OsStr::new("py")))
        .filter(|e| e.file_name() != OsStr::new(MARKER_FILE))
        .map(DirEntry::into_path)
        .collect();

    for file in &doomed {
        println!("Deleting: {}", relative(root, file).display());
        fs::remove_file(file).map_err(|e| ResetError::io(file, e))?;
    }

    Ok(doomed)
}

/// Best-effort removal of `__pycache__` directories under `folder`.
fn remove_bytecode_caches(folder: &Path) {
    let caches: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == OsStr::new(BYTECODE_CACHE_DIR))
        .map(DirEntry::into_path)
        .collect();

    for cache in caches {
        if let Err(e) = fs::remove_dir_all(&cache) {
            debug!(path = %cache.display(), error = %e, "ignoring cache removal failure");
        }
    }
}

fn relative<'p>(root: &Path, path: &'p Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}
