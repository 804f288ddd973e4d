//! Severity levels for findings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a finding.
///
/// Weak warnings count against the warning threshold and share the warning
/// console channel; they stay distinct for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Must be fixed.
    Error,
    /// Should be reviewed.
    Warning,
    /// Worth a look, below warning prominence.
    WeakWarning,
    /// Informational message.
    Info,
}

impl Severity {
    /// Stable lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::WeakWarning => "weak-warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
