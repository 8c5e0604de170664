//! Central database of all source files in a cleaning session.

use crate::file_id::FileId;
use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// The source database, owning all loaded source text and resolving
/// [`FileId`] + byte offsets to line/column coordinates for diagnostics.
///
/// A cleaning session normally loads a single testbench file; tests add
/// in-memory sources via [`add_source`](SourceDb::add_source).
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Loads a source file from the filesystem and returns its [`FileId`].
    ///
    /// An unreadable file is an I/O error for the caller to surface; it is
    /// never converted into a transformation failure.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        let id = FileId::from_raw(self.files.len() as u32);
        let file = SourceFile::new(id, path.to_path_buf(), content);
        self.files.push(file);
        Ok(id)
    }

    /// Adds a source file from an in-memory string (useful for tests).
    ///
    /// The `name` parameter is used as the file path in diagnostics.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        let file = SourceFile::new(id, name.into(), content);
        self.files.push(file);
        id
    }

    /// Returns the [`SourceFile`] for the given [`FileId`].
    ///
    /// # Panics
    ///
    /// Panics if the `FileId` is invalid.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Resolves a [`Span`] to human-readable line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Returns the source text corresponding to a [`Span`].
    pub fn snippet(&self, span: Span) -> &str {
        let file = self.get_file(span.file);
        file.snippet(span.start, span.end)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}
