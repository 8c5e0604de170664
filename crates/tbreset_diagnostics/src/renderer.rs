//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use tbreset_source::SourceDb;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W201]: structural cleaning failed, using lexical fallback
///   --> and_gate_tb.sv:12:5
///    |
/// 12 | covergroup cg @(posedge clk);
///    | ^^^^^^^^^^ parsing stopped here
///    |
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn colorize(&self, severity: &str) -> String {
        if !self.color {
            return severity.to_string();
        }
        let code = match severity {
            "error" => "31",
            "warning" => "33",
            _ => "36",
        };
        format!("\x1b[1;{code}m{severity}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        // Header line: severity[CODE]: message
        out.push_str(&format!(
            "{}[{}]: {}\n",
            self.colorize(&diag.severity.to_string()),
            diag.code,
            diag.message
        ));

        // Location line with source excerpt
        if !diag.primary_span.is_dummy() {
            let resolved = source_db.resolve_span(diag.primary_span);
            out.push_str(&format!("  --> {resolved}\n"));

            let file = source_db.get_file(diag.primary_span.file);
            let (line, col) = file.line_col(diag.primary_span.start);
            let line_num = format!("{line}");
            let padding = " ".repeat(line_num.len());

            let line_content = get_source_line(&file.content, diag.primary_span.start);

            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));

            // Underline, clipped to the visible line
            let span_len = (diag.primary_span.end - diag.primary_span.start).max(1) as usize;
            let remaining = line_content.len().saturating_sub(col as usize - 1).max(1);
            let carets = "^".repeat(span_len.min(remaining));
            let col_padding = " ".repeat((col as usize).saturating_sub(1));

            let primary_msg = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();

            out.push_str(&format!("{padding} | {col_padding}{carets}{primary_msg}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

/// Extracts the line of source code containing the given byte offset.
fn get_source_line(content: &str, byte_offset: u32) -> &str {
    let offset = byte_offset as usize;
    let start = content[..offset].rfind('\n').map_or(0, |pos| pos + 1);
    let end = content[offset..]
        .find('\n')
        .map_or(content.len(), |pos| offset + pos);
    &content[start..end]
}
