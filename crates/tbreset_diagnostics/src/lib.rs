//! Diagnostic creation, severity management, and terminal rendering.
//!
//! tbreset never fails a cleaning run for a malformed testbench — the
//! lexical fallback always produces output — so most diagnostics here are
//! warnings and notes: "the structural parser gave up at this span, falling
//! back", "inserted a missing endmodule". The thread-safe [`DiagnosticSink`]
//! accumulates them during a cleaning call and the CLI renders them with
//! [`TerminalRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
