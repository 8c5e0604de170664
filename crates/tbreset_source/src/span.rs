//! Byte-offset ranges within source files.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A byte offset range within a source file.
///
/// Spans track the location of structural-tree nodes and parse failures
/// back to their origin in the testbench text. `start` is inclusive and
/// `end` is exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The source file this span belongs to.
    pub file: FileId,
    /// Byte offset of the start of the span (inclusive).
    pub start: u32,
    /// Byte offset of the end of the span (exclusive).
    pub end: u32,
}

impl Span {
    /// A dummy span used when no source location is available.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a new span in the given file with the given byte range.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Returns `true` if this is the [`DUMMY`](Span::DUMMY) span.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }

    /// Merges two spans in the same file, producing a span that covers both.
    ///
    /// Takes the minimum start and maximum end of the two spans.
    ///
    /// # Panics
    ///
    /// Panics if the two spans are from different files.
    pub fn merge(self, other: Span) -> Span {
        assert_eq!(
            self.file, other.file,
            "cannot merge spans from different files"
        );
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if this span covers zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overlapping() {
        let file = FileId::from_raw(0);
        let a = Span::new(file, 2, 8);
        let b = Span::new(file, 5, 12);
        let merged = a.merge(b);
        assert_eq!(merged.start, 2);
        assert_eq!(merged.end, 12);
    }

    #[test]
    fn merge_disjoint() {
        let file = FileId::from_raw(0);
        let a = Span::new(file, 0, 3);
        let b = Span::new(file, 10, 20);
        let merged = b.merge(a);
        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 20);
    }

    #[test]
    #[should_panic(expected = "different files")]
    fn merge_different_files_panics() {
        let a = Span::new(FileId::from_raw(0), 0, 1);
        let b = Span::new(FileId::from_raw(1), 0, 1);
        let _ = a.merge(b);
    }

    #[test]
    fn len_and_empty() {
        let file = FileId::from_raw(0);
        assert_eq!(Span::new(file, 4, 9).len(), 5);
        assert!(Span::new(file, 4, 4).is_empty());
        assert!(!Span::new(file, 4, 9).is_empty());
    }

    #[test]
    fn dummy_is_dummy() {
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(FileId::from_raw(0), 0, 1).is_dummy());
    }

    #[test]
    fn serde_roundtrip() {
        let span = Span::new(FileId::from_raw(2), 10, 20);
        let json = serde_json::to_string(&span).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(span, back);
    }
}
