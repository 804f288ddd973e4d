//! Tool descriptors and the per-file analyzer capability.

use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use thiserror::Error;

use crate::finding::Finding;
use crate::severity::Severity;
use crate::source::{Document, SourceFile};

/// Failure of one analyzer on one file, carrying the original cause.
#[derive(Debug, Error)]
#[error("tool '{tool}' failed on {file}")]
pub struct AnalyzerFailure {
    tool: String,
    file: String,
    #[source]
    cause: Box<dyn StdError + Send + Sync>,
}

impl AnalyzerFailure {
    pub fn new(
        tool: impl Into<String>,
        file: impl Into<String>,
        cause: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            tool: tool.into(),
            file: file.into(),
            cause: cause.into(),
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

/// The analyze capability: given a file and its document, produce the
/// findings for that file, in order.
pub trait FileAnalyzer: Send + Sync {
    fn analyze(&self, file: &SourceFile, doc: &Document) -> Result<Vec<Finding>, AnalyzerFailure>;
}

/// What kind of diagnostic a descriptor wraps.
///
/// Only single-file, stateless diagnostics have an analyze contract; every
/// other kind is declared [`ToolKind::Unsupported`] and the analysis loop
/// skips it without attempting or failing anything.
#[derive(Clone)]
pub enum ToolKind {
    PerFile(Arc<dyn FileAnalyzer>),
    Unsupported { kind: String },
}

impl fmt::Debug for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolKind::PerFile(_) => f.write_str("PerFile"),
            ToolKind::Unsupported { kind } => write!(f, "Unsupported({kind})"),
        }
    }
}

/// A resolved diagnostic tool.
///
/// Identity and equality are by `id` alone: two descriptors with the same
/// id are the same tool even when every other field differs, which is what
/// lets an explicit config entry silently override an inherited one.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Globally unique id.
    pub id: String,
    pub display_name: String,
    /// Declared language scope; `None` means any language.
    pub scope: Option<String>,
    /// Configured severity; `None` keeps each finding's own level.
    pub severity: Option<Severity>,
    /// Whether automatic fixing is enabled for this tool.
    pub quick_fix: bool,
    pub kind: ToolKind,
}

impl ToolDescriptor {
    /// A per-file diagnostic backed by `analyzer`.
    pub fn per_file(
        id: impl Into<String>,
        display_name: impl Into<String>,
        analyzer: Arc<dyn FileAnalyzer>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            scope: None,
            severity: None,
            quick_fix: false,
            kind: ToolKind::PerFile(analyzer),
        }
    }

    /// A diagnostic of a kind the engine cannot run.
    pub fn unsupported(
        id: impl Into<String>,
        display_name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            scope: None,
            severity: None,
            quick_fix: false,
            kind: ToolKind::Unsupported { kind: kind.into() },
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

impl PartialEq for ToolDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ToolDescriptor {}

impl Hash for ToolDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
