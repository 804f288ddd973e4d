//! Kensa CLI
//!
//! Configurable static-diagnostics runner with threshold gating and
//! automatic fixes.

mod builtin;
mod cli;
mod commands;
mod output;
mod workspace;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(failed) => {
            if failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Check {
            patterns,
            quiet,
            fix,
            xml_report,
            json_report,
        } => commands::check::run_check(
            &cli,
            patterns,
            *quiet,
            *fix,
            xml_report.as_deref(),
            json_report.as_deref(),
        ),
        Commands::Tools => commands::tools::run_tools(&cli).map(|_| false),
        Commands::Init { force } => commands::init::run_init(*force).map(|_| false),
    }
}
