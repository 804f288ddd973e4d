//! Command line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kensa - configurable static diagnostics with threshold gating
#[derive(Parser)]
#[command(name = "kensa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run diagnostics over files
    Check {
        /// File patterns to check
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Suppress per-finding console output
        #[arg(long)]
        quiet: bool,

        /// Apply automatic fixes
        #[arg(long)]
        fix: bool,

        /// Write an XML report to this path
        #[arg(long, value_name = "PATH")]
        xml_report: Option<PathBuf>,

        /// Write a JSON report to this path
        #[arg(long, value_name = "PATH")]
        json_report: Option<PathBuf>,
    },

    /// List the resolved tool set
    Tools,

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
