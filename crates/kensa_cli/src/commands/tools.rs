//! Tools command implementation

use miette::{IntoDiagnostic, Result};

use kensa_core::{ToolKind, resolve_tools};

use crate::builtin::{BuiltinProfiles, BuiltinRegistry};
use crate::cli::Cli;
use crate::commands::check::load_config;

pub fn run_tools(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let registry = BuiltinRegistry::new();
    let profiles = BuiltinProfiles::new(&registry);

    let resolved = resolve_tools(&config, &registry, &profiles).into_diagnostic()?;

    if resolved.is_empty() {
        println!("No tools resolved. Configure tools or enable profile inheritance.");
        return Ok(());
    }

    for tool in resolved.values() {
        let severity = tool
            .severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "default".to_string());
        let kind = match &tool.kind {
            ToolKind::PerFile(_) => "per-file",
            ToolKind::Unsupported { .. } => "unsupported",
        };
        println!(
            "{:<28} {:<14} {:<12} {}",
            tool.id, severity, kind, tool.display_name
        );
    }

    Ok(())
}
