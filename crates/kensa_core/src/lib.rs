//! Kensa core: the diagnostic orchestration engine.
//!
//! Resolves the effective set of diagnostic tools from configuration and an
//! optionally inherited host profile, runs each tool sequentially over each
//! applicable file with per-severity threshold gating, orders and groups
//! findings for reporting, and applies single-candidate automatic fixes
//! under a write/non-write split with a commit/flush protocol.
//!
//! Concrete rule logic, parsing, and report formats live with the caller;
//! this crate depends only on their capability interfaces ([`FileAnalyzer`],
//! [`FileProvider`], [`ToolRegistry`], [`ProfileStore`], [`Renderer`]).

pub mod access;
pub mod analysis;
pub mod applicability;
pub mod config;
pub mod engine;
pub mod error;
pub mod finding;
pub mod fixer;
pub mod registry;
pub mod report;
pub mod result;
pub mod severity;
pub mod source;
pub mod thresholds;
pub mod tool;

#[cfg(test)]
pub(crate) mod testing;

pub use access::AccessArbiter;
pub use analysis::{AnalysisOutcome, run_analysis};
pub use applicability::applies;
pub use config::{EngineConfig, SeverityGroup, ToolSettings};
pub use engine::Engine;
pub use error::{EngineError, FixError};
pub use finding::{Finding, QuickFix};
pub use fixer::apply_fixes;
pub use registry::{ProfileEntry, ProfileStore, TOOL_ID_SUFFIX, ToolRegistry, resolve_tools};
pub use report::{Renderer, report};
pub use result::ToolResult;
pub use severity::Severity;
pub use source::{Anchor, Document, FileProvider, SharedDocument, SourceFile, Span, share};
pub use thresholds::{ThresholdCounters, Thresholds};
pub use tool::{AnalyzerFailure, FileAnalyzer, ToolDescriptor, ToolKind};
