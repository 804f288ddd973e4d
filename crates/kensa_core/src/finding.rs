//! Findings produced by diagnostic tools.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::FixError;
use crate::severity::Severity;
use crate::source::{Anchor, Document};

/// An automated transformation resolving one finding.
///
/// Consuming a finding whose anchor is already gone is a no-op for the
/// applicator, so re-applying a fix is always safe.
pub trait QuickFix: Send + Sync {
    /// Display name used in logs.
    fn name(&self) -> &str;

    /// Whether this fix must run inside the batched write-transaction
    /// scope. Fixes returning false manage their own short mutations and
    /// run in the synchronous non-transactional phase.
    fn requires_write_action(&self) -> bool {
        true
    }

    /// Applies the fix at the anchored location.
    fn apply(&self, anchor: Anchor, doc: &mut Document) -> Result<(), FixError>;
}

/// One reported diagnostic instance.
pub struct Finding {
    /// Owning file name.
    pub file: String,
    /// 1-based line.
    pub line: u32,
    /// Tie-break ordinal within the line.
    pub row: u32,
    /// Severity; the owning tool's configured level overrides it when set.
    pub severity: Severity,
    /// Human-renderable message.
    pub message: String,
    /// Candidate fixes. Only findings with exactly one are fix-eligible.
    pub fixes: Vec<Arc<dyn QuickFix>>,
    anchor: Mutex<Option<Anchor>>,
}

impl Finding {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        row: u32,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            row,
            severity,
            message: message.into(),
            fixes: Vec::new(),
            anchor: Mutex::new(None),
        }
    }

    /// Attaches the live source anchor.
    pub fn with_anchor(self, anchor: Anchor) -> Self {
        *self.anchor.lock() = Some(anchor);
        self
    }

    /// Adds a candidate fix.
    pub fn with_fix(mut self, fix: Arc<dyn QuickFix>) -> Self {
        self.fixes.push(fix);
        self
    }

    /// Whether the live handle is still present.
    pub fn has_anchor(&self) -> bool {
        self.anchor.lock().is_some()
    }

    /// Consumes the live handle. `None` means it was already consumed.
    pub fn take_anchor(&self) -> Option<Anchor> {
        self.anchor.lock().take()
    }

    /// `file:line` rendering for logs.
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

impl fmt::Debug for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finding")
            .field("file", &self.file)
            .field("line", &self.line)
            .field("row", &self.row)
            .field("severity", &self.severity)
            .field("message", &self.message)
            .field("fixes", &self.fixes.len())
            .field("anchored", &self.has_anchor())
            .finish()
    }
}

impl Clone for Finding {
    fn clone(&self) -> Self {
        Self {
            file: self.file.clone(),
            line: self.line,
            row: self.row,
            severity: self.severity,
            message: self.message.clone(),
            fixes: self.fixes.clone(),
            anchor: Mutex::new(*self.anchor.lock()),
        }
    }
}
