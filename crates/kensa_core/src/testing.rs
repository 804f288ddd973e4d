//! Test doubles shared by the engine tests.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::FixError;
use crate::finding::{Finding, QuickFix};
use crate::report::Renderer;
use crate::source::{Anchor, Document, FileProvider, SharedDocument, SourceFile, share};
use crate::tool::{AnalyzerFailure, FileAnalyzer};

/// In-memory provider over named documents.
#[derive(Default)]
pub struct MemoryProvider {
    files: Vec<(Arc<SourceFile>, SharedDocument)>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, language: &str, text: &str) -> SharedDocument {
        let doc = share(Document::in_memory(text));
        self.files
            .push((Arc::new(SourceFile::new(name, language)), doc.clone()));
        doc
    }

    /// Registers an externally created document, e.g. one backed by disk.
    pub fn add_shared(&mut self, name: &str, language: &str, doc: SharedDocument) {
        self.files
            .push((Arc::new(SourceFile::new(name, language)), doc));
    }
}

impl FileProvider for MemoryProvider {
    fn files(&self) -> Vec<(Arc<SourceFile>, SharedDocument)> {
        self.files.clone()
    }

    fn document(&self, name: &str) -> Option<SharedDocument> {
        self.files
            .iter()
            .find(|(file, _)| file.name() == name)
            .map(|(_, doc)| doc.clone())
    }
}

/// Analyzer returning clones of canned findings per file name.
pub struct CannedAnalyzer {
    pub per_file: Vec<(String, Vec<Finding>)>,
}

impl CannedAnalyzer {
    pub fn new(per_file: Vec<(String, Vec<Finding>)>) -> Self {
        Self { per_file }
    }
}

impl FileAnalyzer for CannedAnalyzer {
    fn analyze(&self, file: &SourceFile, _doc: &Document) -> Result<Vec<Finding>, AnalyzerFailure> {
        Ok(self
            .per_file
            .iter()
            .filter(|(name, _)| name == file.name())
            .flat_map(|(_, findings)| findings.clone())
            .collect())
    }
}

/// Analyzer that fails on every file.
pub struct FailingAnalyzer {
    pub tool: String,
}

impl FileAnalyzer for FailingAnalyzer {
    fn analyze(&self, file: &SourceFile, _doc: &Document) -> Result<Vec<Finding>, AnalyzerFailure> {
        Err(AnalyzerFailure::new(
            self.tool.clone(),
            file.name(),
            "synthetic analyzer failure",
        ))
    }
}

/// Fix replacing the anchored span with fixed text.
pub struct ReplaceFix {
    pub label: String,
    pub replacement: String,
    pub write_action: bool,
}

impl ReplaceFix {
    pub fn new(label: &str, replacement: &str, write_action: bool) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            replacement: replacement.to_string(),
            write_action,
        })
    }
}

impl QuickFix for ReplaceFix {
    fn name(&self) -> &str {
        &self.label
    }

    fn requires_write_action(&self) -> bool {
        self.write_action
    }

    fn apply(&self, anchor: Anchor, doc: &mut Document) -> Result<(), FixError> {
        let span = doc.anchor_span(anchor).ok_or(FixError::StaleAnchor)?;
        doc.replace_range(span, &self.replacement)
    }
}

/// Fix that always fails.
pub struct BrokenFix;

impl QuickFix for BrokenFix {
    fn name(&self) -> &str {
        "broken-fix"
    }

    fn apply(&self, _anchor: Anchor, _doc: &mut Document) -> Result<(), FixError> {
        Err(FixError::Failed("synthetic fix failure".to_string()))
    }
}

/// Renderer recording everything it is fed, observable from outside via the
/// shared log handles.
pub struct RecordingRenderer {
    log: Arc<Mutex<Vec<String>>>,
    finalized: Arc<Mutex<usize>>,
}

impl RecordingRenderer {
    #[allow(clippy::type_complexity)]
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>, Arc<Mutex<usize>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let finalized = Arc::new(Mutex::new(0));
        (
            Self {
                log: log.clone(),
                finalized: finalized.clone(),
            },
            log,
            finalized,
        )
    }
}

impl Renderer for RecordingRenderer {
    fn accept(&mut self, finding: &Finding, tool_id: &str) -> io::Result<()> {
        self.log.lock().push(format!(
            "{}:{}:{} {} [{}]",
            finding.file, finding.line, finding.row, finding.severity, tool_id
        ));
        Ok(())
    }

    fn finalize(&mut self) -> io::Result<()> {
        *self.finalized.lock() += 1;
        Ok(())
    }
}
