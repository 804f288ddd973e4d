//! JSON report renderer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use kensa_core::{Finding, Renderer};

/// Buffers findings and writes one pretty-printed JSON array on finalize.
pub struct JsonRenderer<W: Write> {
    out: W,
    entries: Vec<serde_json::Value>,
}

impl JsonRenderer<BufWriter<File>> {
    pub fn to_path(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            entries: Vec::new(),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn accept(&mut self, finding: &Finding, tool_id: &str) -> io::Result<()> {
        self.entries.push(serde_json::json!({
            "file": finding.file,
            "line": finding.line,
            "row": finding.row,
            "severity": finding.severity,
            "tool": tool_id,
            "message": finding.message,
            "fixable": finding.fixes.len() == 1,
        }));
        Ok(())
    }

    fn finalize(&mut self) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(&self.entries)?;
        writeln!(self.out, "{rendered}")?;
        self.out.flush()
    }
}
