//! Engine error types.

use thiserror::Error;

/// Errors that abort a run before or during setup.
///
/// Everything else the engine encounters (analyzer failures, ambiguous fix
/// sets, renderer errors) is absorbed into the logs and the final success
/// flag.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host profile error.
    #[error("Profile error: {0}")]
    Profile(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a profile error.
    pub fn profile(message: impl Into<String>) -> Self {
        Self::Profile(message.into())
    }
}

/// Errors raised while applying a single fix. Always caught by the fix
/// applicator; a failing fix never aborts the remaining ones.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixError {
    /// The edit range does not fit the document.
    #[error("edit range {start}..{end} is out of bounds for a document of {len} bytes")]
    OutOfBounds { start: u32, end: u32, len: usize },

    /// The anchored location no longer exists in the document.
    #[error("source anchor is no longer valid")]
    StaleAnchor,

    /// Fix-specific failure.
    #[error("{0}")]
    Failed(String),
}
