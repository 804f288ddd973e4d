//! Automatic fix application.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::access::AccessArbiter;
use crate::config::EngineConfig;
use crate::finding::{Finding, QuickFix};
use crate::result::ToolResult;
use crate::source::FileProvider;

/// Applies every eligible single-candidate fix.
///
/// Fixes split into two ordered batches: those requiring the
/// write-transaction scope run first under one write guard, the rest run
/// afterwards outside any scope. Touched documents are then committed and
/// persisted. Nothing in here is fatal — ineligible findings, failing
/// fixes, and vanished documents are logged and skipped.
pub fn apply_fixes(
    results: &BTreeMap<String, ToolResult>,
    config: &EngineConfig,
    provider: &dyn FileProvider,
    access: &AccessArbiter,
) {
    if !config.apply_fixes {
        debug!("automatic fixing disabled; skipping");
        return;
    }

    let mut write_fixes: Vec<(&Finding, Arc<dyn QuickFix>)> = Vec::new();
    let mut other_fixes: Vec<(&Finding, Arc<dyn QuickFix>)> = Vec::new();

    for result in results.values() {
        if !result.tool().quick_fix {
            continue;
        }
        for finding in result.findings() {
            match finding.fixes.as_slice() {
                [fix] => {
                    if fix.requires_write_action() {
                        write_fixes.push((finding, fix.clone()));
                    } else {
                        other_fixes.push((finding, fix.clone()));
                    }
                }
                fixes => {
                    error!(
                        "finding at {} has {} candidate fixes; exactly one is required",
                        finding.location(),
                        fixes.len()
                    );
                }
            }
        }
    }

    let mut touched = TouchedFiles::default();

    {
        let _write = access.acquire_write();
        for (finding, fix) in &write_fixes {
            apply_single(finding, fix.as_ref(), provider, &mut touched);
        }
    }

    for (finding, fix) in &other_fixes {
        apply_single(finding, fix.as_ref(), provider, &mut touched);
    }

    flush(&touched, provider);
}

/// Ordered, deduplicated names of files a fix ran against.
#[derive(Debug, Default)]
struct TouchedFiles {
    order: Vec<String>,
}

impl TouchedFiles {
    fn record(&mut self, name: &str) {
        if !self.order.iter().any(|n| n == name) {
            self.order.push(name.to_string());
        }
    }
}

fn apply_single(
    finding: &Finding,
    fix: &dyn QuickFix,
    provider: &dyn FileProvider,
    touched: &mut TouchedFiles,
) {
    let Some(anchor) = finding.take_anchor() else {
        // Already consumed by an earlier application; re-applying is a
        // harmless no-op.
        info!(
            "fix '{}' at {} already applied; skipping",
            fix.name(),
            finding.location()
        );
        return;
    };

    let Some(doc) = provider.document(&finding.file) else {
        error!(
            "no live document for {} while applying '{}'",
            finding.file,
            fix.name()
        );
        return;
    };

    let mut doc = doc.write();
    let before = blake3::hash(doc.text().as_bytes());
    if let Err(e) = fix.apply(anchor, &mut doc) {
        error!("fix '{}' failed at {}: {e}", fix.name(), finding.location());
        return;
    }
    let after = blake3::hash(doc.text().as_bytes());
    if before == after {
        info!(
            "fix '{}' at {} made no changes",
            fix.name(),
            finding.location()
        );
    } else {
        debug!("applied fix '{}' at {}", fix.name(), finding.location());
    }
    drop(doc);

    touched.record(&finding.file);
}

/// Commits pending document operations and persists every touched file.
fn flush(touched: &TouchedFiles, provider: &dyn FileProvider) {
    for name in &touched.order {
        match provider.document(name) {
            Some(doc) => {
                let mut doc = doc.write();
                doc.commit();
                if let Err(e) = doc.save() {
                    error!("failed to persist {name}: {e}");
                }
            }
            None => warn!("no live document for {name} at flush time; skipping"),
        }
    }
}
