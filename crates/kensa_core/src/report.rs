//! Aggregation, ordering, and rendering of findings.

use std::collections::{BTreeMap, HashMap};
use std::io;

use tracing::{error, info, warn};

use crate::finding::Finding;
use crate::result::ToolResult;
use crate::severity::Severity;

/// A pluggable report sink fed one finding at a time.
pub trait Renderer {
    /// Accepts one (finding, tool id) pair, in report order.
    fn accept(&mut self, finding: &Finding, tool_id: &str) -> io::Result<()>;

    /// Flushes the report. Called exactly once, after every finding.
    fn finalize(&mut self) -> io::Result<()>;
}

/// Flattens, orders, and emits all findings.
///
/// Findings sort by (line, row) ascending — a genuine lexicographic
/// comparison — and group by file name, groups in first-encounter order of
/// the sorted sequence. Each finding gets a console line on its severity's
/// channel (unless quiet) and is fed to every renderer; renderers finalize
/// once at the end. Renderer errors are logged and absorbed.
pub fn report(
    results: &BTreeMap<String, ToolResult>,
    renderers: &mut [Box<dyn Renderer>],
    quiet: bool,
) {
    let mut entries: Vec<(&Finding, &str)> = results
        .iter()
        .flat_map(|(id, result)| result.findings().iter().map(move |f| (f, id.as_str())))
        .collect();

    // Stable sort keeps equal (line, row) pairs in tool order.
    entries.sort_by_key(|(finding, _)| (finding.line, finding.row));

    for (_, group) in group_by_file(&entries) {
        for (finding, tool_id) in group {
            if !quiet {
                log_finding(finding);
            }
            for renderer in renderers.iter_mut() {
                if let Err(e) = renderer.accept(finding, tool_id) {
                    error!("report renderer failed to accept a finding: {e}");
                }
            }
        }
    }

    for renderer in renderers.iter_mut() {
        if let Err(e) = renderer.finalize() {
            error!("report renderer failed to finalize: {e}");
        }
    }
}

/// Groups sorted entries by file name, first-encounter order preserved.
fn group_by_file<'a>(
    entries: &[(&'a Finding, &'a str)],
) -> Vec<(&'a str, Vec<(&'a Finding, &'a str)>)> {
    let mut groups: Vec<(&str, Vec<(&Finding, &str)>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for &(finding, tool_id) in entries {
        let file = finding.file.as_str();
        let slot = *index.entry(file).or_insert_with(|| {
            groups.push((file, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push((finding, tool_id));
    }

    groups
}

/// One console line on the channel matching the finding's severity.
fn log_finding(finding: &Finding) {
    match finding.severity {
        Severity::Info => info!("{}: {}", finding.location(), finding.message),
        Severity::Warning | Severity::WeakWarning => {
            warn!("{}: {}", finding.location(), finding.message)
        }
        Severity::Error => error!("{}: {}", finding.location(), finding.message),
    }
}
