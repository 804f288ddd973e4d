//! Effective tool-set resolution.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::severity::Severity;
use crate::tool::ToolDescriptor;

/// Suffix tried when a configured short name does not match a tool id
/// exactly: "trailing-whitespace" resolves to "trailing-whitespace-rule".
pub const TOOL_ID_SUFFIX: &str = "-rule";

/// Everything the host knows how to run.
pub trait ToolRegistry {
    fn all_tools(&self) -> Vec<ToolDescriptor>;
}

/// One entry of a host diagnostic profile.
#[derive(Debug, Clone)]
pub struct ProfileEntry {
    pub tool: ToolDescriptor,
    /// The profile's own severity mapping for this tool.
    pub severity: Severity,
    pub enabled: bool,
}

/// Host store of named diagnostic profiles.
pub trait ProfileStore {
    /// Loads the named profile, or the current one when `name` is `None`.
    fn load(&self, name: Option<&str>) -> Result<Vec<ProfileEntry>, EngineError>;
}

/// Resolves the effective tool set.
///
/// When profile inheritance is on, every enabled profile entry joins the
/// set carrying the profile's severity mapping. Every explicitly configured
/// name must then resolve against the registry; explicit entries overwrite
/// inherited ones sharing an id, and an unresolvable explicit name aborts
/// the run.
pub fn resolve_tools(
    config: &EngineConfig,
    registry: &dyn ToolRegistry,
    profiles: &dyn ProfileStore,
) -> Result<BTreeMap<String, ToolDescriptor>, EngineError> {
    let mut resolved = BTreeMap::new();

    if config.inherit_from_profile {
        let entries = profiles.load(config.profile_name.as_deref())?;
        let mut inherited = Vec::new();
        for entry in entries {
            if !entry.enabled {
                continue;
            }
            let tool = entry.tool.with_severity(entry.severity);
            inherited.push(tool.id.clone());
            resolved.insert(tool.id.clone(), tool);
        }
        info!(
            profile = config.profile_name.as_deref().unwrap_or("<current>"),
            tools = ?inherited,
            "inherited tools from host profile"
        );
    }

    let known = registry.all_tools();
    for (name, severity, settings) in config.explicit_entries() {
        let mut tool = resolve_name(name, &known)
            .ok_or_else(|| EngineError::config(format!("unknown tool '{name}'")))?;
        tool.severity = Some(severity);
        tool.quick_fix = settings.quick_fix;
        resolved.insert(tool.id.clone(), tool);
    }

    info!(tools = ?resolved.keys().collect::<Vec<_>>(), "resolved effective tool set");
    Ok(resolved)
}

/// Matches a configured name by exact id, short name plus suffix, or
/// display name, in that order.
fn resolve_name(name: &str, known: &[ToolDescriptor]) -> Option<ToolDescriptor> {
    let suffixed = format!("{name}{TOOL_ID_SUFFIX}");
    known
        .iter()
        .find(|tool| tool.id == name)
        .or_else(|| known.iter().find(|tool| tool.id == suffixed))
        .or_else(|| known.iter().find(|tool| tool.display_name == name))
        .cloned()
}
