//! Builtin tools, the registry over them, and the in-memory profile store.

mod rules;

use kensa_core::{EngineError, ProfileEntry, ProfileStore, ToolDescriptor, ToolKind, ToolRegistry};

/// The tools this binary ships.
pub struct BuiltinRegistry {
    tools: Vec<ToolDescriptor>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            tools: rules::all_tools(),
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry for BuiltinRegistry {
    fn all_tools(&self) -> Vec<ToolDescriptor> {
        self.tools.clone()
    }
}

/// Profile store with a single `default` profile enabling every per-file
/// builtin at its natural severity. Tool kinds the engine cannot run stay
/// registered but disabled.
pub struct BuiltinProfiles {
    entries: Vec<ProfileEntry>,
}

impl BuiltinProfiles {
    pub fn new(registry: &BuiltinRegistry) -> Self {
        let entries = registry
            .tools
            .iter()
            .map(|tool| ProfileEntry {
                severity: rules::default_severity(&tool.id),
                enabled: matches!(tool.kind, ToolKind::PerFile(_)),
                tool: tool.clone(),
            })
            .collect();
        Self { entries }
    }
}

impl ProfileStore for BuiltinProfiles {
    fn load(&self, name: Option<&str>) -> Result<Vec<ProfileEntry>, EngineError> {
        match name {
            None | Some("default") => Ok(self.entries.clone()),
            Some(other) => Err(EngineError::profile(format!("unknown profile '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registry_exposes_every_builtin() {
        let registry = BuiltinRegistry::new();
        let ids: Vec<String> = registry
            .all_tools()
            .into_iter()
            .map(|tool| tool.id)
            .collect();

        assert!(ids.contains(&"no-todo-rule".to_string()));
        assert!(ids.contains(&"trailing-whitespace-rule".to_string()));
        assert!(ids.contains(&"bare-url-rule".to_string()));
        assert!(ids.contains(&"long-line-rule".to_string()));
        assert!(ids.contains(&"reference-graph-rule".to_string()));
    }

    #[test]
    fn default_profile_disables_unsupported_kinds() {
        let registry = BuiltinRegistry::new();
        let profiles = BuiltinProfiles::new(&registry);

        let entries = profiles.load(None).unwrap();
        let graph = entries
            .iter()
            .find(|entry| entry.tool.id == "reference-graph-rule")
            .unwrap();
        assert!(!graph.enabled);

        let enabled = entries.iter().filter(|entry| entry.enabled).count();
        assert_eq!(enabled, 4);
    }

    #[test]
    fn named_default_profile_loads() {
        let registry = BuiltinRegistry::new();
        let profiles = BuiltinProfiles::new(&registry);
        assert!(profiles.load(Some("default")).is_ok());
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let registry = BuiltinRegistry::new();
        let profiles = BuiltinProfiles::new(&registry);
        assert!(matches!(
            profiles.load(Some("strict")),
            Err(EngineError::Profile(_))
        ));
    }
}
