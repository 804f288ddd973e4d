//! File discovery and the disk-backed workspace.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::Glob;
use tracing::{info, warn};
use walkdir::WalkDir;

use kensa_core::{
    Document, EngineError, FileProvider, SharedDocument, SourceFile, share,
};

/// Workspace over files discovered on disk.
///
/// Documents open eagerly so that analysis and flush share one live
/// instance per file.
#[derive(Debug)]
pub struct DiskWorkspace {
    files: Vec<(Arc<SourceFile>, SharedDocument)>,
}

impl DiskWorkspace {
    /// Discovers files matching the glob patterns under the current
    /// directory.
    pub fn discover(patterns: &[String]) -> Result<Self, EngineError> {
        Self::discover_under(Path::new("."), patterns)
    }

    /// Discovers files matching the glob patterns under `root`.
    pub fn discover_under(root: &Path, patterns: &[String]) -> Result<Self, EngineError> {
        let mut paths = Vec::new();

        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                EngineError::config(format!("Invalid pattern '{}': {}", pattern, e))
            })?;
            let matcher = glob.compile_matcher();

            for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                let relative = path.strip_prefix(root).unwrap_or(path);
                if path.is_file() && matcher.is_match(relative) {
                    paths.push(path.to_path_buf());
                }
            }
        }

        paths.sort();
        paths.dedup();

        info!("Discovered {} files to check", paths.len());
        Ok(Self::open_all(root, paths))
    }

    /// Opens the given paths, skipping unreadable ones with a warning.
    fn open_all(root: &Path, paths: Vec<PathBuf>) -> Self {
        let mut files = Vec::new();
        for path in paths {
            let doc = match Document::open(&path) {
                Ok(doc) => share(doc),
                Err(e) => {
                    warn!("Failed to open {}: {}", path.display(), e);
                    continue;
                }
            };
            let name = display_name(root, &path);
            let language = language_for(&path);
            files.push((Arc::new(SourceFile::new(name, language)), doc));
        }
        Self { files }
    }
}

impl FileProvider for DiskWorkspace {
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

/// Root-relative display name.
fn display_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Maps a file extension to its host-language tag.
fn language_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("md") | Some("markdown") => "markdown",
        Some("mdx") => "mdx",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn discovers_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("skip.txt"), "x").unwrap();

        let workspace =
            DiskWorkspace::discover_under(dir.path(), &["*.md".to_string()]).unwrap();

        let names: Vec<String> = workspace
            .files()
            .iter()
            .map(|(file, _)| file.name().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn duplicate_pattern_matches_are_deduped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();

        let workspace = DiskWorkspace::discover_under(
            dir.path(),
            &["*.md".to_string(), "a.*".to_string()],
        )
        .unwrap();

        assert_eq!(workspace.files().len(), 1);
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            DiskWorkspace::discover_under(dir.path(), &["[bad".to_string()]).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn document_lookup_is_by_display_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "content").unwrap();

        let workspace =
            DiskWorkspace::discover_under(dir.path(), &["*.md".to_string()]).unwrap();

        let doc = workspace.document("a.md").unwrap();
        assert_eq!(doc.read().text(), "content");
        assert!(workspace.document("missing.md").is_none());
    }

    #[test]
    fn languages_map_from_extensions() {
        assert_eq!(language_for(Path::new("a.md")), "markdown");
        assert_eq!(language_for(Path::new("a.MARKDOWN")), "markdown");
        assert_eq!(language_for(Path::new("a.mdx")), "mdx");
        assert_eq!(language_for(Path::new("a.txt")), "text");
        assert_eq!(language_for(Path::new("no-extension")), "text");
    }
}
