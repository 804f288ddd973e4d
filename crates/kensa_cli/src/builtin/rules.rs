//! Builtin per-file rules.

use std::sync::Arc;

use kensa_core::{
    Anchor, AnalyzerFailure, Document, FileAnalyzer, Finding, FixError, QuickFix, Severity,
    SourceFile, Span, ToolDescriptor,
};

pub const NO_TODO: &str = "no-todo-rule";
pub const TRAILING_WHITESPACE: &str = "trailing-whitespace-rule";
pub const BARE_URL: &str = "bare-url-rule";
pub const LONG_LINE: &str = "long-line-rule";
pub const REFERENCE_GRAPH: &str = "reference-graph-rule";

/// Every tool this binary ships, including the whole-project one the engine
/// cannot run.
pub fn all_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::per_file(NO_TODO, "No TODO markers", Arc::new(NoTodo)),
        ToolDescriptor::per_file(
            TRAILING_WHITESPACE,
            "Trailing whitespace",
            Arc::new(TrailingWhitespace),
        ),
        ToolDescriptor::per_file(BARE_URL, "Bare URLs", Arc::new(BareUrl)).with_scope("commonmark"),
        ToolDescriptor::per_file(LONG_LINE, "Long lines", Arc::new(LongLine::default())),
        ToolDescriptor::unsupported(REFERENCE_GRAPH, "Unresolved references", "whole-project"),
    ]
}

/// The default profile's severity mapping.
pub fn default_severity(id: &str) -> Severity {
    match id {
        NO_TODO | TRAILING_WHITESPACE => Severity::Warning,
        BARE_URL => Severity::WeakWarning,
        LONG_LINE => Severity::Info,
        _ => Severity::Warning,
    }
}

/// Yields (1-based line number, byte offset of line start, line content
/// without its terminator).
fn lines(text: &str) -> impl Iterator<Item = (u32, usize, &str)> {
    text.split_inclusive('\n').scan(0usize, |offset, raw| {
        let start = *offset;
        *offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Some((start, line))
    })
    .enumerate()
    .map(|(idx, (start, line))| (idx as u32 + 1, start, line))
}

/// Flags TODO/FIXME/XXX task markers.
struct NoTodo;

const TODO_MARKERS: &[&str] = &["TODO", "FIXME", "XXX"];

impl FileAnalyzer for NoTodo {
    fn analyze(&self, file: &SourceFile, doc: &Document) -> Result<Vec<Finding>, AnalyzerFailure> {
        let mut findings = Vec::new();
        for (line_no, _start, line) in lines(doc.text()) {
            let mut matches: Vec<(usize, &str)> = TODO_MARKERS
                .iter()
                .flat_map(|marker| line.match_indices(marker).map(|(pos, _)| (pos, *marker)))
                .collect();
            matches.sort_by_key(|(pos, _)| *pos);

            for (row, (_, marker)) in matches.into_iter().enumerate() {
                findings.push(Finding::new(
                    file.name(),
                    line_no,
                    row as u32,
                    Severity::Warning,
                    format!("Found '{marker}' marker. Resolve it before committing."),
                ));
            }
        }
        Ok(findings)
    }
}

/// Flags whitespace runs before a line terminator; fixable by deletion.
struct TrailingWhitespace;

impl FileAnalyzer for TrailingWhitespace {
    fn analyze(&self, file: &SourceFile, doc: &Document) -> Result<Vec<Finding>, AnalyzerFailure> {
        let mut findings = Vec::new();
        for (line_no, start, line) in lines(doc.text()) {
            let trimmed = line.trim_end_matches([' ', '\t']);
            if trimmed.len() < line.len() {
                let span = Span::new(
                    (start + trimmed.len()) as u32,
                    (start + line.len()) as u32,
                );
                findings.push(
                    Finding::new(
                        file.name(),
                        line_no,
                        0,
                        Severity::Warning,
                        "Trailing whitespace",
                    )
                    .with_anchor(doc.anchor(span))
                    .with_fix(Arc::new(TrimFix)),
                );
            }
        }
        Ok(findings)
    }
}

/// Deletes the anchored whitespace run.
struct TrimFix;

impl QuickFix for TrimFix {
    fn name(&self) -> &str {
        "trim-trailing-whitespace"
    }

    fn apply(&self, anchor: Anchor, doc: &mut Document) -> Result<(), FixError> {
        let span = doc.anchor_span(anchor).ok_or(FixError::StaleAnchor)?;
        doc.replace_range(span, "")
    }
}

/// Flags raw http(s) URLs; fixable by wrapping in angle brackets.
struct BareUrl;

impl FileAnalyzer for BareUrl {
    fn analyze(&self, file: &SourceFile, doc: &Document) -> Result<Vec<Finding>, AnalyzerFailure> {
        let mut findings = Vec::new();
        for (line_no, start, line) in lines(doc.text()) {
            let mut row = 0;
            let mut from = 0;
            while let Some(rel) = line[from..].find("http") {
                let pos = from + rel;
                let rest = &line[pos..];
                let scheme_len = if rest.starts_with("https://") {
                    8
                } else if rest.starts_with("http://") {
                    7
                } else {
                    from = pos + 4;
                    continue;
                };

                let url_len = rest
                    .find(|c: char| c.is_whitespace() || c == '>' || c == ')')
                    .unwrap_or(rest.len());
                let wrapped = line[..pos].ends_with('<') || line[..pos].ends_with('(');

                if !wrapped && url_len > scheme_len {
                    let span = Span::new((start + pos) as u32, (start + pos + url_len) as u32);
                    findings.push(
                        Finding::new(
                            file.name(),
                            line_no,
                            row,
                            Severity::WeakWarning,
                            format!("Bare URL '{}'. Wrap it in angle brackets.", &rest[..url_len]),
                        )
                        .with_anchor(doc.anchor(span))
                        .with_fix(Arc::new(WrapUrlFix)),
                    );
                    row += 1;
                }
                from = pos + url_len.max(4);
            }
        }
        Ok(findings)
    }
}

/// Wraps the anchored URL in angle brackets. The edit is self-contained,
/// so it runs in the non-transactional phase.
struct WrapUrlFix;

impl QuickFix for WrapUrlFix {
    fn name(&self) -> &str {
        "wrap-bare-url"
    }

    fn requires_write_action(&self) -> bool {
        false
    }

    fn apply(&self, anchor: Anchor, doc: &mut Document) -> Result<(), FixError> {
        let span = doc.anchor_span(anchor).ok_or(FixError::StaleAnchor)?;
        let url = doc.text()[span.start as usize..span.end as usize].to_string();
        doc.replace_range(span, &format!("<{url}>"))
    }
}

/// Flags lines longer than the limit, in characters.
struct LongLine {
    limit: usize,
}

impl Default for LongLine {
    fn default() -> Self {
        Self { limit: 120 }
    }
}

impl FileAnalyzer for LongLine {
    fn analyze(&self, file: &SourceFile, doc: &Document) -> Result<Vec<Finding>, AnalyzerFailure> {
        let mut findings = Vec::new();
        for (line_no, _start, line) in lines(doc.text()) {
            let width = line.chars().count();
            if width > self.limit {
                findings.push(Finding::new(
                    file.name(),
                    line_no,
                    0,
                    Severity::Info,
                    format!("Line is {width} characters long ({} allowed)", self.limit),
                ));
            }
        }
        Ok(findings)
    }
}
