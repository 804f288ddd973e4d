//! Source files and the plain-text document model.
//!
//! The engine treats the source tree as an ordered collection of
//! ([`SourceFile`], [`Document`]) pairs supplied by a [`FileProvider`].
//! Documents carry a marker table so findings can hold live anchors that
//! survive earlier edits; an edit overlapping an anchored range invalidates
//! the anchor.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::FixError;

/// A byte range in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Identity of a file under analysis: a stable display name plus the
/// host-language tag the applicability filter dispatches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    language: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }

    /// Stable display name, also the flush-time lookup key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host-language tag.
    pub fn language(&self) -> &str {
        &self.language
    }
}

/// A live handle into a document's marker table.
///
/// Resolving an anchor whose range was clobbered by an edit yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    index: u32,
}

/// An in-memory text document with an optional storage path.
///
/// All mutation goes through [`Document::replace_range`], which keeps the
/// marker table in sync: markers past the edit shift by the edit delta,
/// markers overlapping it are invalidated. [`Document::commit`] settles
/// pending model operations; [`Document::save`] persists dirty text.
#[derive(Debug)]
pub struct Document {
    text: String,
    path: Option<PathBuf>,
    markers: Mutex<Vec<Option<Span>>>,
    pending_edits: usize,
    dirty: bool,
}

impl Document {
    /// Creates a document with no storage path. Saving is a no-op.
    pub fn in_memory(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
            markers: Mutex::new(Vec::new()),
            pending_edits: 0,
            dirty: false,
        }
    }

    /// Opens a document backed by a file on disk.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        Ok(Self {
            text,
            path: Some(path),
            markers: Mutex::new(Vec::new()),
            pending_edits: 0,
            dirty: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Registers a live anchor covering `span`.
    ///
    /// The marker table uses interior mutability because analyzers hold
    /// shared document references while producing findings.
    pub fn anchor(&self, span: Span) -> Anchor {
        let mut markers = self.markers.lock();
        markers.push(Some(span));
        Anchor {
            index: (markers.len() - 1) as u32,
        }
    }

    /// Resolves an anchor to its current span, if still valid.
    pub fn anchor_span(&self, anchor: Anchor) -> Option<Span> {
        self.markers
            .lock()
            .get(anchor.index as usize)
            .copied()
            .flatten()
    }

    /// Replaces `span` with `replacement` and re-anchors the marker table.
    pub fn replace_range(&mut self, span: Span, replacement: &str) -> Result<(), FixError> {
        let start = span.start as usize;
        let end = span.end as usize;
        if start > self.text.len()
            || end > self.text.len()
            || start > end
            || !self.text.is_char_boundary(start)
            || !self.text.is_char_boundary(end)
        {
            return Err(FixError::OutOfBounds {
                start: span.start,
                end: span.end,
                len: self.text.len(),
            });
        }

        self.text.replace_range(start..end, replacement);

        let delta = replacement.len() as i64 - (end - start) as i64;
        let mut markers = self.markers.lock();
        for slot in markers.iter_mut() {
            if let Some(marker) = slot {
                if marker.start as usize >= end {
                    *marker = Span::new(
                        (marker.start as i64 + delta) as u32,
                        (marker.end as i64 + delta) as u32,
                    );
                } else if marker.end as usize <= start {
                    // Entirely before the edit; untouched.
                } else {
                    // The edit clobbered the anchored range.
                    *slot = None;
                }
            }
        }

        self.pending_edits += 1;
        self.dirty = true;
        Ok(())
    }

    /// Settles pending document-model operations after a batch of edits.
    pub fn commit(&mut self) {
        self.pending_edits = 0;
    }

    pub fn has_pending_edits(&self) -> bool {
        self.pending_edits > 0
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persists the current text to the storage path.
    pub fn save(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = &self.path {
            fs::write(path, &self.text)?;
        }
        self.dirty = false;
        Ok(())
    }
}

/// A document shared between the engine, analyzers, and the fix applicator.
pub type SharedDocument = Arc<RwLock<Document>>;

/// Wraps a document for sharing.
pub fn share(doc: Document) -> SharedDocument {
    Arc::new(RwLock::new(doc))
}

/// Supplies the ordered set of files to analyze and re-resolves live
/// documents by file name at flush time.
pub trait FileProvider {
    /// Ordered (file, document) pairs for one analysis pass.
    fn files(&self) -> Vec<(Arc<SourceFile>, SharedDocument)>;

    /// The live document for `name`, if one still exists.
    fn document(&self, name: &str) -> Option<SharedDocument>;
}
