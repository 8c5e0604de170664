//! Common result and error types for the tbreset workspace.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates a bug in tbreset, not a problem with the user's input.
/// Malformed testbench source is never an `InternalError` — it is either a
/// `ParseError` (recovered by the lexical fallback) or handled permissively.
pub type TbResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in tbreset, not a user input problem.
///
/// The code emitter returns this when a tree node carries a span that does
/// not fit the source document it claims to come from. The strategy selector
/// treats it like any other structural failure and falls back to the lexical
/// path, so it never reaches the user as a hard error under the default
/// strategy.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
