//! Language-scope applicability of tools to files.

use crate::source::SourceFile;
use crate::tool::ToolDescriptor;

/// The primary dialect of the shared embedding layer.
pub const MARKDOWN: &str = "markdown";
/// The secondary dialect that embeds the primary one.
pub const MDX: &str = "mdx";
/// The embedding layer both dialects share.
pub const COMMONMARK: &str = "commonmark";

/// Whether `tool` should run on `file`.
///
/// Tool scopes are declared against engine-internal language tags that do
/// not line up 1:1 with a file's host language. The markdown and mdx
/// dialects are the known aliasing cases: for a file in either, a tool
/// applies only when it is unscoped, scoped to that dialect itself, or
/// scoped to the shared commonmark layer. Every other host language accepts
/// every tool.
pub fn applies(tool: &ToolDescriptor, file: &SourceFile) -> bool {
    match file.language() {
        lang @ (MARKDOWN | MDX) => match tool.scope.as_deref() {
            None => true,
            Some(scope) => scope == lang || scope == COMMONMARK,
        },
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::finding::Finding;
    use crate::source::Document;
    use crate::tool::{AnalyzerFailure, FileAnalyzer};

    struct NullAnalyzer;

    impl FileAnalyzer for NullAnalyzer {
        fn analyze(
            &self,
            _file: &SourceFile,
            _doc: &Document,
        ) -> Result<Vec<Finding>, AnalyzerFailure> {
            Ok(Vec::new())
        }
    }

    fn tool(scope: Option<&str>) -> ToolDescriptor {
        let tool = ToolDescriptor::per_file("t-rule", "T", Arc::new(NullAnalyzer));
        match scope {
            Some(scope) => tool.with_scope(scope),
            None => tool,
        }
    }

    #[rstest]
    // Dialect files accept unscoped, own-dialect, and shared-layer tools.
    #[case("markdown", None, true)]
    #[case("markdown", Some("markdown"), true)]
    #[case("markdown", Some("commonmark"), true)]
    #[case("markdown", Some("mdx"), false)]
    #[case("markdown", Some("text"), false)]
    #[case("mdx", None, true)]
    #[case("mdx", Some("mdx"), true)]
    #[case("mdx", Some("commonmark"), true)]
    #[case("mdx", Some("markdown"), false)]
    // Every other host language is universally applicable.
    #[case("text", Some("markdown"), true)]
    #[case("text", None, true)]
    #[case("html", Some("anything"), true)]
    fn scope_matrix(#[case] language: &str, #[case] scope: Option<&str>, #[case] expected: bool) {
        let file = SourceFile::new("f", language);
        assert_eq!(applies(&tool(scope), &file), expected);
    }
}
