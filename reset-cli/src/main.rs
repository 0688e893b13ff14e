use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};

use reset_cli::config::{self, ResetConfig, CI_VAR, DEFAULT_DATABASE, DEFAULT_REQUIREMENTS};
use reset_cli::confirm::TerminalPrompt;
use reset_cli::process::SystemRunner;
use reset_cli::{logging, pipeline, ResetError};

/// Exit status used when the run is interrupted with Ctrl+C
const INTERRUPTED: i32 = 130;

#[derive(Parser)]
#[command(name = "django-reset")]
#[command(about = "Reset Django environment safely.", long_about = None)]
struct Cli {
    /// Run without interactive confirmations
    #[arg(long, short = 'y')]
    yes: bool,

    /// Skip deleting the database file
    #[arg(long)]
    skip_db: bool,

    /// Skip migration cleanup
    #[arg(long)]
    skip_clean: bool,

    /// Skip dependency installation
    #[arg(long)]
    skip_install: bool,

    /// Project root (where manage.py lives)
    #[arg(long, short = 'C', env = "DJANGO_RESET_PROJECT_DIR", default_value = ".")]
    project_dir: PathBuf,

    /// SQLite database file, relative to the project root
    #[arg(long, env = "DJANGO_RESET_DATABASE", default_value = DEFAULT_DATABASE)]
    database: PathBuf,

    /// Requirements file, relative to the project root
    #[arg(long, env = "DJANGO_RESET_REQUIREMENTS", default_value = DEFAULT_REQUIREMENTS)]
    requirements: PathBuf,

    /// Python interpreter (default: active virtualenv, then python3)
    #[arg(long, env = "DJANGO_RESET_PYTHON")]
    python: Option<String>,

    /// Print debug diagnostics to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> ResetConfig {
        let ci = config::ci_detected(std::env::var(CI_VAR).ok().as_deref());
        let virtual_env = std::env::var_os("VIRTUAL_ENV").map(PathBuf::from);
        self.into_config_with(ci, virtual_env.as_deref())
    }

    fn into_config_with(self, ci: bool, virtual_env: Option<&Path>) -> ResetConfig {
        ResetConfig {
            python: config::resolve_python(self.python, virtual_env),
            database: self.database,
            requirements: self.requirements,
            force: self.yes,
            ci,
            skip_db: self.skip_db,
            skip_clean: self.skip_clean,
            skip_install: self.skip_install,
            project_dir: self.project_dir,
        }
    }
}

fn main() {
    // .env values never override the real environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = ctrlc::set_handler(|| {
        println!();
        println!("{}", style("Operation cancelled.").yellow());
        std::process::exit(INTERRUPTED);
    }) {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }

    let config = cli.into_config();
    tracing::debug!(?config, "resolved configuration");

    let code = match pipeline::run(&config, &mut TerminalPrompt, &mut SystemRunner) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            report(&e);
            e.exit_code()
        }
    };

    std::process::exit(code);
}

fn report(err: &ResetError) {
    eprintln!("{}", style(err).red().bold());

    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  {} {}", style("caused by:").dim(), cause);
        source = cause.source();
    }
}
