//! Testbench cleaning: strips stimulus, declarations, and waveform plumbing
//! from a Verilog testbench, leaving the module skeleton and instantiation
//! points.
//!
//! Two transformers produce the skeleton. The structural one parses the file
//! and rewrites the tree; the lexical one walks the text line by line and
//! handles anything the parser rejects. [`Cleaner`] selects between them per
//! the configured [`CleanStrategy`]; under [`CleanStrategy::Auto`] a parse or
//! emit failure falls back to the lexical path, so cleaning never fails on
//! malformed input.

pub mod lexical;
pub mod naming;
pub mod postprocess;
pub mod structural;

use serde::{Deserialize, Serialize};
use tbreset_common::{InternalError, Interner};
use tbreset_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Label};
use tbreset_parser::{emit, parse_file, ParseError};
use tbreset_source::{FileId, SourceDb, Span};

/// Which transformer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanStrategy {
    /// Structural with lexical fallback. Never fails.
    #[default]
    Auto,
    /// Structural only; parse and emit failures surface as errors.
    Structural,
    /// Lexical only. Never fails.
    Lexical,
}

/// Which transformer actually produced the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanPath {
    Structural,
    Lexical,
}

#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub text: String,
    pub path: CleanPath,
}

/// Failure of the structural path under [`CleanStrategy::Structural`].
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
    #[error("emit failed: {0}")]
    Emit(#[from] InternalError),
}

pub struct Cleaner {
    strategy: CleanStrategy,
}

impl Cleaner {
    pub fn new(strategy: CleanStrategy) -> Self {
        Cleaner { strategy }
    }

    /// Cleans a file previously loaded into `db`.
    ///
    /// Warnings and notes about the run (fallback taken, repairs made) go to
    /// `sink`; only [`CleanStrategy::Structural`] can return an error.
    pub fn clean(
        &self,
        file: FileId,
        db: &SourceDb,
        sink: &DiagnosticSink,
    ) -> Result<CleanOutput, CleanError> {
        match self.strategy {
            CleanStrategy::Structural => self.structural(file, db, sink),
            CleanStrategy::Lexical => Ok(self.lexical(file, db, sink)),
            CleanStrategy::Auto => match self.structural(file, db, sink) {
                Ok(output) => Ok(output),
                Err(err) => {
                    sink.emit(fallback_warning(&err));
                    Ok(self.lexical(file, db, sink))
                }
            },
        }
    }

    fn structural(
        &self,
        file: FileId,
        db: &SourceDb,
        sink: &DiagnosticSink,
    ) -> Result<CleanOutput, CleanError> {
        let interner = Interner::new();
        let tree = parse_file(file, db, &interner)?;
        let skeleton = structural::transform(&tree, &interner);
        let text = emit::emit(&skeleton, db, &interner)?;
        let text = self.finish(text, sink);
        Ok(CleanOutput {
            text,
            path: CleanPath::Structural,
        })
    }

    fn lexical(&self, file: FileId, db: &SourceDb, sink: &DiagnosticSink) -> CleanOutput {
        let text = lexical::clean_text(&db.get_file(file).content);
        let text = self.finish(text, sink);
        CleanOutput {
            text,
            path: CleanPath::Lexical,
        }
    }

    fn finish(&self, text: String, sink: &DiagnosticSink) -> String {
        let done = postprocess::apply(&text);
        if done.inserted_endmodules > 0 {
            sink.emit(Diagnostic::note(
                DiagnosticCode::new(Category::Note, 301),
                format!(
                    "inserted {} missing `endmodule`",
                    done.inserted_endmodules
                ),
                Span::DUMMY,
            ));
        }
        done.text
    }
}

fn fallback_warning(err: &CleanError) -> Diagnostic {
    let (message, span) = match err {
        CleanError::Parse(parse) => (format!("structural clean failed: {parse}"), parse.span),
        CleanError::Emit(internal) => {
            (format!("structural clean failed: {internal}"), Span::DUMMY)
        }
    };
    let mut diag = Diagnostic::warning(
        DiagnosticCode::new(Category::Warning, 201),
        message,
        span,
    )
    .with_note("falling back to line-based cleaning");
    if !span.is_dummy() {
        diag = diag.with_label(Label::primary(span, "not parseable here"));
    }
    diag
}
