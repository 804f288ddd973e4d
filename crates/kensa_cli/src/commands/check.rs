//! Check command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;

use kensa_core::{Engine, EngineConfig, Renderer};

use crate::builtin::{BuiltinProfiles, BuiltinRegistry};
use crate::cli::Cli;
use crate::output::{JsonRenderer, XmlRenderer};
use crate::workspace::DiskWorkspace;

pub fn run_check(
    cli: &Cli,
    patterns: &[String],
    quiet: bool,
    fix: bool,
    xml_report: Option<&Path>,
    json_report: Option<&Path>,
) -> Result<bool> {
    let mut config = load_config(cli)?;
    if quiet {
        config.quiet = true;
    }
    if fix {
        config.apply_fixes = true;
    }

    let registry = BuiltinRegistry::new();
    let profiles = BuiltinProfiles::new(&registry);
    let provider = DiskWorkspace::discover(patterns).into_diagnostic()?;

    let mut renderers: Vec<Box<dyn Renderer>> = Vec::new();
    if let Some(path) = xml_report {
        renderers.push(Box::new(XmlRenderer::to_path(path).into_diagnostic()?));
    }
    if let Some(path) = json_report {
        renderers.push(Box::new(JsonRenderer::to_path(path).into_diagnostic()?));
    }

    let engine = Engine::new(config);
    let success = engine
        .run(&registry, &profiles, &provider, &mut renderers)
        .into_diagnostic()?;

    Ok(!success)
}

/// Loads configuration from `--config`, a discovered `.kensa.json(c)`, or
/// defaults. The default falls back to profile inheritance so the builtin
/// tools run out of the box.
pub fn load_config(cli: &Cli) -> Result<EngineConfig> {
    if let Some(path) = &cli.config {
        return EngineConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = EngineConfig::discover(".") {
        info!("Using config: {}", path.display());
        return EngineConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using the default profile");
    let mut config = EngineConfig::new();
    config.inherit_from_profile = true;
    Ok(config)
}
