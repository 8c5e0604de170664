//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E` (parse/emit failures).
    Error,
    /// Warning diagnostics, prefixed with `W` (fallbacks, repairs).
    Warning,
    /// Note diagnostics, prefixed with `N` (verbose-mode commentary).
    Note,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Note => 'N',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric
/// identifier, displayed as e.g. `E101` or `W201`.
///
/// Assignments used across the workspace:
/// - `E101` structural path failed with the fallback disabled
///   (lex/parse), `E102` same for the emitter
/// - `W201` structural path abandoned, falling back to lexical
/// - `N301` skeleton repairs made by the post-processor
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_zero_padded() {
        assert_eq!(
            format!("{}", DiagnosticCode::new(Category::Error, 101)),
            "E101"
        );
        assert_eq!(
            format!("{}", DiagnosticCode::new(Category::Warning, 1)),
            "W001"
        );
        assert_eq!(
            format!("{}", DiagnosticCode::new(Category::Note, 301)),
            "N301"
        );
    }

    #[test]
    fn equality() {
        let a = DiagnosticCode::new(Category::Warning, 201);
        let b = DiagnosticCode::new(Category::Warning, 201);
        assert_eq!(a, b);
        assert_ne!(a, DiagnosticCode::new(Category::Error, 201));
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Error, 102);
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
