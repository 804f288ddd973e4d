//! The analysis loop: every resolved tool over every applicable file.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use tracing::{debug, error, warn};

use crate::access::AccessArbiter;
use crate::applicability::applies;
use crate::result::ToolResult;
use crate::source::FileProvider;
use crate::thresholds::{ThresholdCounters, Thresholds};
use crate::tool::{ToolDescriptor, ToolKind};

/// Result of one analysis pass.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Tool id → result, for every tool that ran (even partially).
    pub results: BTreeMap<String, ToolResult>,
    /// True iff no threshold was exceeded.
    pub success: bool,
}

/// Runs each tool over each applicable file.
///
/// Every finding feeds the threshold counters in exact production order —
/// the nth finding of a breaching severity is what triggers the stop, so
/// nothing is batched or reordered before the check. A latched threshold
/// stops the current tool's remaining findings and files immediately and no
/// subsequent tool runs.
pub fn run_analysis(
    tools: &BTreeMap<String, ToolDescriptor>,
    provider: &dyn FileProvider,
    limits: &Thresholds,
    access: &AccessArbiter,
) -> AnalysisOutcome {
    let mut counters = ThresholdCounters::new();
    let mut results = BTreeMap::new();

    for (id, tool) in tools {
        let analyzer = match &tool.kind {
            ToolKind::PerFile(analyzer) => analyzer.clone(),
            ToolKind::Unsupported { kind } => {
                warn!("tool '{id}' has unsupported kind '{kind}'; skipping");
                continue;
            }
        };

        let mut findings = Vec::new();
        let mut breached = false;
        {
            // Mutation of the source tree is forbidden for the whole pass.
            let _read = access.acquire_read();
            for (file, doc) in provider.files() {
                if !applies(tool, &file) {
                    debug!("tool '{id}' does not apply to {}", file.name());
                    continue;
                }
                let produced = {
                    let doc = doc.read();
                    analyzer.analyze(&file, &doc)
                };
                match produced {
                    Ok(batch) => {
                        for mut finding in batch {
                            if let Some(severity) = tool.severity {
                                finding.severity = severity;
                            }
                            let still_ok = counters.register(finding.severity, limits);
                            findings.push(finding);
                            if !still_ok {
                                breached = true;
                                break;
                            }
                        }
                    }
                    Err(failure) => {
                        // Recoverable at tool/file granularity; whatever the
                        // tool produced for other files stands.
                        error!("{}", render_chain(&failure));
                    }
                }
                if breached {
                    break;
                }
            }
        }
        results.insert(id.clone(), ToolResult::new(tool.clone(), findings));
        if breached {
            warn!("finding threshold exceeded; stopping analysis");
            break;
        }
    }

    AnalysisOutcome {
        results,
        success: counters.is_ok(),
    }
}

/// Renders an error with its full cause chain for the log.
fn render_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut cause = err.source();
    while let Some(current) = cause {
        rendered.push_str(": ");
        rendered.push_str(&current.to_string());
        cause = current.source();
    }
    rendered
}
