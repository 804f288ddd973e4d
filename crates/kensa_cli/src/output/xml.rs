//! XML report renderer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use kensa_core::{Finding, Renderer};

/// Buffers findings and writes a structured XML report on finalize,
/// grouped by file in arrival order.
pub struct XmlRenderer<W: Write> {
    out: W,
    groups: Vec<(String, Vec<Entry>)>,
}

struct Entry {
    line: u32,
    row: u32,
    severity: &'static str,
    tool: String,
    message: String,
}

impl XmlRenderer<BufWriter<File>> {
    pub fn to_path(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> XmlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            groups: Vec::new(),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for XmlRenderer<W> {
    fn accept(&mut self, finding: &Finding, tool_id: &str) -> io::Result<()> {
        let entry = Entry {
            line: finding.line,
            row: finding.row,
            severity: finding.severity.as_str(),
            tool: tool_id.to_string(),
            message: finding.message.clone(),
        };
        let same_group = matches!(self.groups.last(), Some((file, _)) if *file == finding.file);
        if !same_group {
            self.groups.push((finding.file.clone(), Vec::new()));
        }
        if let Some((_, entries)) = self.groups.last_mut() {
            entries.push(entry);
        }
        Ok(())
    }

    fn finalize(&mut self) -> io::Result<()> {
        writeln!(self.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(self.out, "<report>")?;
        for (file, entries) in &self.groups {
            writeln!(self.out, "  <file name=\"{}\">", escape(file))?;
            for entry in entries {
                writeln!(
                    self.out,
                    "    <finding line=\"{}\" row=\"{}\" severity=\"{}\" tool=\"{}\" message=\"{}\"/>",
                    entry.line,
                    entry.row,
                    entry.severity,
                    escape(&entry.tool),
                    escape(&entry.message),
                )?;
            }
            writeln!(self.out, "  </file>")?;
        }
        writeln!(self.out, "</report>")?;
        self.out.flush()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
