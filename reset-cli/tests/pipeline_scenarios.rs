//! End-to-end runs of the reset pipeline against throwaway project trees

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use reset_cli::pipeline::{self, Outcome};
use reset_cli::process::CommandStatus;
use reset_cli::testing::{RecordingRunner, ScriptedPrompt};
use reset_cli::{ResetConfig, ResetError};

const MAKEMIGRATIONS: &str = "python3 manage.py makemigrations";
const MIGRATE: &str = "python3 manage.py migrate";
const PIP_INSTALL: &str = "python3 -m pip install -r requirements.txt";

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    touch(root, "manage.py");
    touch(root, "db.sqlite3");
    touch(root, "requirements.txt");
    touch(root, "polls/migrations/__init__.py");
    touch(root, "polls/migrations/0001_initial.py");
    touch(root, ".venv/lib/site-packages/polls/migrations/__init__.py");
    touch(root, ".venv/lib/site-packages/polls/migrations/0001_initial.py");
    dir
}

fn config_for(dir: &TempDir) -> ResetConfig {
    let mut config = ResetConfig::new(dir.path());
    config.python = "python3".to_string();
    config
}

#[test]
fn ci_run_never_prompts() {
    for force in [false, true] {
        let dir = project();
        let mut config = config_for(&dir);
        config.ci = true;
        config.force = force;
        let mut prompt = ScriptedPrompt::default();
        let mut runner = RecordingRunner::new();

        let outcome = pipeline::run(&config, &mut prompt, &mut runner).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert!(prompt.asked().is_empty());
        assert!(!dir.path().join("db.sqlite3").exists());
        assert!(!dir.path().join("polls/migrations/0001_initial.py").exists());
        assert!(dir.path().join("polls/migrations/__init__.py").exists());
        assert_eq!(
            runner.command_lines(),
            vec![MAKEMIGRATIONS, MIGRATE, PIP_INSTALL]
        );
    }
}

#[test]
fn interactive_run_asks_before_each_destructive_step() {
    let dir = project();
    let config = config_for(&dir);
    let mut prompt = ScriptedPrompt::new([true, true, true]);
    let mut runner = RecordingRunner::new();

    let outcome = pipeline::run(&config, &mut prompt, &mut runner).unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(
        prompt.asked(),
        [
            "Delete database 'db.sqlite3'?",
            "Remove all migration files (except __init__.py)?",
            "Install dependencies from 'requirements.txt'?",
        ]
    );
    assert_eq!(
        runner.command_lines(),
        vec![MAKEMIGRATIONS, MIGRATE, PIP_INSTALL]
    );
}

#[test]
fn declining_database_deletion_stops_everything() {
    let dir = project();
    let config = config_for(&dir);
    let mut prompt = ScriptedPrompt::new([false]);
    let mut runner = RecordingRunner::new();

    let outcome = pipeline::run(&config, &mut prompt, &mut runner).unwrap();

    assert_eq!(outcome, Outcome::Aborted);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(prompt.asked().len(), 1);
    assert!(dir.path().join("db.sqlite3").exists());
    assert!(dir.path().join("polls/migrations/0001_initial.py").exists());
    assert!(runner.commands().is_empty());
}

#[test]
fn declining_cleanup_and_install_still_completes() {
    let dir = project();
    let config = config_for(&dir);
    let mut prompt = ScriptedPrompt::new([true, false, false]);
    let mut runner = RecordingRunner::new();

    let outcome = pipeline::run(&config, &mut prompt, &mut runner).unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert!(dir.path().join("polls/migrations/0001_initial.py").exists());
    assert_eq!(runner.command_lines(), vec![MAKEMIGRATIONS, MIGRATE]);
}

#[test]
fn missing_database_is_not_prompted_for() {
    let dir = project();
    fs::remove_file(dir.path().join("db.sqlite3")).unwrap();
    let config = config_for(&dir);
    let mut prompt = ScriptedPrompt::new([true, true]);
    let mut runner = RecordingRunner::new();

    let outcome = pipeline::run(&config, &mut prompt, &mut runner).unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(
        prompt.asked(),
        [
            "Remove all migration files (except __init__.py)?",
            "Install dependencies from 'requirements.txt'?",
        ]
    );
}

#[test]
fn dependency_environment_is_left_alone() {
    let dir = project();
    let mut config = config_for(&dir);
    config.force = true;
    let mut prompt = ScriptedPrompt::default();
    let mut runner = RecordingRunner::new();

    pipeline::run(&config, &mut prompt, &mut runner).unwrap();

    let vendored = dir.path().join(".venv/lib/site-packages/polls/migrations");
    assert!(vendored.join("__init__.py").exists());
    assert!(vendored.join("0001_initial.py").exists());
}

#[test]
fn failed_migration_is_fatal_and_skips_install() {
    for failing in ["makemigrations", "migrate"] {
        let dir = project();
        let mut config = config_for(&dir);
        config.ci = true;
        let mut prompt = ScriptedPrompt::default();
        let mut runner = RecordingRunner::new().with_status(failing, CommandStatus::failure(1));

        let err = pipeline::run(&config, &mut prompt, &mut runner).unwrap_err();

        assert!(matches!(err, ResetError::MigrationsFailed(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(!runner.command_lines().iter().any(|c| c == PIP_INSTALL));
    }
}

#[test]
fn failed_install_is_fatal() {
    let dir = project();
    let mut config = config_for(&dir);
    config.ci = true;
    let mut prompt = ScriptedPrompt::default();
    let mut runner = RecordingRunner::new().with_status("pip", CommandStatus::failure(1));

    let err = pipeline::run(&config, &mut prompt, &mut runner).unwrap_err();

    assert!(matches!(err, ResetError::InstallFailed(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn missing_manifest_completes_without_install() {
    let dir = project();
    fs::remove_file(dir.path().join("requirements.txt")).unwrap();
    let mut config = config_for(&dir);
    config.ci = true;
    let mut prompt = ScriptedPrompt::default();
    let mut runner = RecordingRunner::new();

    let outcome = pipeline::run(&config, &mut prompt, &mut runner).unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(runner.command_lines(), vec![MAKEMIGRATIONS, MIGRATE]);
}

#[test]
fn skipping_every_optional_step_only_migrates() {
    let dir = project();
    let mut config = config_for(&dir);
    config.ci = true;
    config.skip_db = true;
    config.skip_clean = true;
    config.skip_install = true;
    let mut prompt = ScriptedPrompt::default();
    let mut runner = RecordingRunner::new();

    let outcome = pipeline::run(&config, &mut prompt, &mut runner).unwrap();

    assert_eq!(outcome, Outcome::Completed);
    assert!(prompt.asked().is_empty());
    assert!(dir.path().join("db.sqlite3").exists());
    assert!(dir.path().join("polls/migrations/0001_initial.py").exists());
    assert_eq!(runner.command_lines(), vec![MAKEMIGRATIONS, MIGRATE]);
}
