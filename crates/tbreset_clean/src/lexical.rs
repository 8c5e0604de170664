//! Line-based transformer used when the file will not parse.
//!
//! A single pass over the text with a small state machine. Block comments are
//! stripped first since they can span lines; every rule after that sees one
//! physical line at a time. Nesting counters are naive substring counts, not
//! string-literal-aware; that is an accepted limit of this path.

use once_cell::sync::Lazy;
use regex::Regex;

/// Per-line lexer state. `Normal` between constructs; the other states carry
/// a multi-line construct that is being dropped or consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Normal,
    /// Inside an `initial begin ... end`; payload is the `begin` depth.
    InStimulusBlock(u32),
    /// Inside a `` `define `` with backslash continuations.
    InMacroContinuation,
    /// Inside a multi-line `parameter`/`localparam`, waiting for `;`.
    InParameterDecl,
    /// Inside a multi-line variable/net declaration, waiting for `;`.
    InVariableDecl,
    /// Inside an instantiation port list; payload is the paren depth.
    InPortList(u32),
}

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex"));
static INITIAL_BEGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*initial\s+begin\b").expect("initial begin regex"));
static INITIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*initial\b").expect("initial regex"));
static SYSTEM_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\$monitor|\$dumpfile|\$dumpvars|\$finish").expect("call regex"));
static DEFINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*`define\s").expect("define regex"));
static PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(parameter|localparam)\s").expect("parameter regex"));
static VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(reg|wire|integer|real|time|realtime)\s").expect("variable regex")
});
static STATEMENT_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(assign|if|for|while|case|function|task|module|endmodule)\b")
        .expect("keyword regex")
});
static INSTANCE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*(?:\w+\s+)*\w+)\s*\(").expect("prefix regex"));

/// Cleans the text line by line. Never fails.
pub fn clean_text(source: &str) -> String {
    let source = BLOCK_COMMENT.replace_all(source, "");
    let mut out = Vec::new();
    let mut state = LexState::Normal;
    for line in source.lines() {
        state = step(line, state, &mut out);
    }
    out.join("\n")
}

fn step(line: &str, state: LexState, out: &mut Vec<String>) -> LexState {
    match state {
        LexState::InStimulusBlock(depth) => {
            let depth = depth + count(line, "begin");
            let closes = count(line, "end");
            if closes >= depth {
                LexState::Normal
            } else {
                LexState::InStimulusBlock(depth - closes)
            }
        }
        LexState::InMacroContinuation => {
            if line.trim_end().ends_with('\\') {
                LexState::InMacroContinuation
            } else {
                LexState::Normal
            }
        }
        LexState::InParameterDecl | LexState::InVariableDecl => {
            if line.contains(';') {
                LexState::Normal
            } else {
                state
            }
        }
        LexState::InPortList(depth) => {
            let depth = depth + count(line, "(");
            let closes = count(line, ")");
            if closes >= depth {
                LexState::Normal
            } else {
                LexState::InPortList(depth - closes)
            }
        }
        LexState::Normal => step_normal(line, out),
    }
}

fn step_normal(line: &str, out: &mut Vec<String>) -> LexState {
    if INITIAL_BEGIN.is_match(line) {
        // The opening line itself is not scanned for nested blocks.
        return LexState::InStimulusBlock(1);
    }
    if INITIAL.is_match(line) {
        return LexState::Normal;
    }
    if SYSTEM_CALL.is_match(line) {
        return LexState::Normal;
    }
    if DEFINE.is_match(line) {
        return if line.trim_end().ends_with('\\') {
            LexState::InMacroContinuation
        } else {
            LexState::Normal
        };
    }
    if PARAMETER.is_match(line) {
        return if line.contains(';') {
            LexState::Normal
        } else {
            LexState::InParameterDecl
        };
    }
    if VARIABLE.is_match(line) {
        return if line.contains(';') {
            LexState::Normal
        } else {
            LexState::InVariableDecl
        };
    }
    let stripped = strip_line_comment(line);
    if stripped.trim().is_empty() {
        return LexState::Normal;
    }
    if let Some(open) = stripped.find('(') {
        if !STATEMENT_KEYWORD.is_match(stripped) {
            if let Some(captures) = INSTANCE_PREFIX.captures(stripped) {
                let prefix = &captures[1];
                out.push(format!("{prefix} ();"));
                // The remainder of this line, from the first paren on, counts
                // toward the port list depth.
                let rest = &stripped[open..];
                let depth = count(rest, "(");
                let closes = count(rest, ")");
                return if closes >= depth {
                    LexState::Normal
                } else {
                    LexState::InPortList(depth - closes)
                };
            }
        }
    }
    out.push(stripped.to_string());
    LexState::Normal
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn count(line: &str, needle: &str) -> u32 {
    line.matches(needle).count() as u32
}
