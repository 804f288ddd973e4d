//! Engine configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::severity::Severity;
use crate::thresholds::Thresholds;

/// Settings for one configured tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolSettings {
    /// Enables automatic fixing for this tool.
    #[serde(default)]
    pub quick_fix: bool,
}

/// One per-severity group: the tools reported at this level plus an
/// optional maximum finding count before the run fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeverityGroup {
    /// Maximum findings of this severity; absent means unbounded.
    #[serde(default)]
    pub max: Option<usize>,

    /// Tool name (id, short name, or display name) → settings.
    #[serde(default)]
    pub tools: BTreeMap<String, ToolSettings>,
}

/// Configuration for one engine run.
///
/// Passed into the engine, never owned by it: callers construct it directly
/// or load it from a JSON/JSONC file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Tools reported as errors.
    #[serde(default)]
    pub errors: SeverityGroup,

    /// Tools reported as warnings.
    #[serde(default)]
    pub warnings: SeverityGroup,

    /// Tools reported as infos.
    #[serde(default)]
    pub infos: SeverityGroup,

    /// Suppresses per-finding console output.
    #[serde(default)]
    pub quiet: bool,

    /// Permits automatic fixing at all.
    #[serde(default)]
    pub apply_fixes: bool,

    /// Merges the host profile's enabled tools under the explicit ones.
    #[serde(default)]
    pub inherit_from_profile: bool,

    /// Profile to inherit; absent means the current/default profile.
    #[serde(default)]
    pub profile_name: Option<String>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON or JSONC file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON/JSONC string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let value = jsonc_parser::parse_to_serde_value(json, &jsonc_parser::ParseOptions::default())
            .map_err(|e| EngineError::config(format!("Invalid config: {e}")))?
            .ok_or_else(|| EngineError::config("Empty config"))?;
        serde_json::from_value(value)
            .map_err(|e| EngineError::config(format!("Invalid config: {e}")))
    }

    /// Finds `.kensa.jsonc` or `.kensa.json` under `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        [".kensa.jsonc", ".kensa.json"]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Every explicitly configured (name, severity, settings) entry, in
    /// stable group-then-name order.
    pub fn explicit_entries(&self) -> impl Iterator<Item = (&str, Severity, &ToolSettings)> {
        let groups = [
            (&self.errors, Severity::Error),
            (&self.warnings, Severity::Warning),
            (&self.infos, Severity::Info),
        ];
        groups.into_iter().flat_map(|(group, severity)| {
            group
                .tools
                .iter()
                .map(move |(name, settings)| (name.as_str(), severity, settings))
        })
    }

    /// The per-severity maxima for threshold checking.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            max_errors: self.errors.max,
            max_warnings: self.warnings.max,
            max_infos: self.infos.max,
        }
    }
}
