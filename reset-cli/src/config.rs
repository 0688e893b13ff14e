//! Run configuration
//!
//! Everything a reset run needs is resolved once, up front, into a
//! [`ResetConfig`] which is then passed by reference to every step. Nothing
//! downstream reads the process environment on its own.

use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "db.sqlite3";
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";
pub const MANAGE_SCRIPT: &str = "manage.py";

/// Name of the environment variable CI providers set
pub const CI_VAR: &str = "CI";

#[derive(Debug, Clone, PartialEq)]
pub struct ResetConfig {
    /// Directory every relative path is resolved against
    pub project_dir: PathBuf,
    /// SQLite database file, relative to `project_dir`
    pub database: PathBuf,
    /// Dependency manifest, relative to `project_dir`
    pub requirements: PathBuf,
    /// Interpreter used for `manage.py` and `pip`
    pub python: String,
    /// Skip every confirmation (`--yes`)
    pub force: bool,
    /// Running under continuous integration
    pub ci: bool,
    pub skip_db: bool,
    pub skip_clean: bool,
    pub skip_install: bool,
}

impl ResetConfig {
    /// Defaults for a project rooted at `project_dir`.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            database: PathBuf::from(DEFAULT_DATABASE),
            requirements: PathBuf::from(DEFAULT_REQUIREMENTS),
            python: default_python().to_string(),
            force: false,
            ci: false,
            skip_db: false,
            skip_clean: false,
            skip_install: false,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.project_dir.join(&self.database)
    }

    pub fn requirements_path(&self) -> PathBuf {
        self.project_dir.join(&self.requirements)
    }

    /// Confirmations are skipped entirely when forced or under CI.
    pub fn unattended(&self) -> bool {
        self.force || self.ci
    }
}

/// Interpret the value of the `CI` variable.
///
/// Only `true` and `1` count, compared case-insensitively and without
/// trimming.
pub fn ci_detected(value: Option<&str>) -> bool {
    match value {
        Some(v) => v.eq_ignore_ascii_case("true") || v == "1",
        None => false,
    }
}

/// Pick the interpreter to run Django with.
///
/// An explicit choice wins. Otherwise the active virtualenv's interpreter is
/// used when it exists on disk, and finally the platform default.
pub fn resolve_python(explicit: Option<String>, virtual_env: Option<&Path>) -> String {
    if let Some(python) = explicit.filter(|p| !p.trim().is_empty()) {
        return python;
    }

    if let Some(venv) = virtual_env {
        let candidate = venv_interpreter(venv);
        if candidate.is_file() {
            return candidate.to_string_lossy().into_owned();
        }
    }

    default_python().to_string()
}

fn venv_interpreter(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join("python.exe")
    } else {
        venv.join("bin").join("python")
    }
}

fn default_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}
