//! fprune command line entry point.
//!
//! Assembles settings from defaults, config file, environment and flags,
//! installs logging, runs the cleanup and prints the summary.

mod cli;
mod logging;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fprune::settings::CONFIG_ENV;
use fprune::{PruneError, RunStatus, Settings, SettingsLayer};
use tracing::info;

use crate::cli::Cli;

const EXIT_CONFIG: u8 = 1;
const EXIT_ISSUES: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    logging::init(&settings.log);
    info!(version = env!("CARGO_PKG_VERSION"), paths = settings.paths.len(), "starting fprune");

    let results = fprune::run(&settings);
    println!("{results}");

    match results.status() {
        RunStatus::Success => ExitCode::SUCCESS,
        RunStatus::CompletedWithIssues => ExitCode::from(EXIT_ISSUES),
    }
}

/// Defaults, then config file, then environment, then flags.
fn load_settings(cli: &Cli) -> Result<Settings, PruneError> {
    let explicit = cli
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let file = SettingsLayer::load_file(explicit.as_deref())?;
    let env = SettingsLayer::from_env()?;

    SettingsLayer::defaults()
        .merge(file)
        .merge(env)
        .merge(cli.layer())
        .validate()
}

fn report_error(e: &PruneError) {
    eprintln!("Error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
