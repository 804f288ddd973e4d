//! Per-tool analysis results.

use crate::finding::Finding;
use crate::tool::ToolDescriptor;

/// A tool paired with the ordered findings it produced for the whole run.
///
/// Created once after the tool's analysis pass completes (possibly cut
/// short by a threshold) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ToolResult {
    tool: ToolDescriptor,
    findings: Vec<Finding>,
}

impl ToolResult {
    pub fn new(tool: ToolDescriptor, findings: Vec<Finding>) -> Self {
        Self { tool, findings }
    }

    pub fn tool(&self) -> &ToolDescriptor {
        &self.tool
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
