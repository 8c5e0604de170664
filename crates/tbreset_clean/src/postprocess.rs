//! Skeleton post-processor shared by both transformers.
//!
//! Drops residue lines left behind by line removal, then repairs the module
//! structure: any `module` without a matching `endmodule` before the next
//! module (or end of file) gets one inserted. Repairs run in reverse source
//! order so insertions do not shift pending indices.

use once_cell::sync::Lazy;
use regex::Regex;

static RESIDUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s);]*$").expect("residue regex"));
static MODULE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmodule\b").expect("module regex"));
static ENDMODULE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bendmodule\b").expect("endmodule regex"));

pub struct Postprocessed {
    pub text: String,
    /// Number of `endmodule` lines the repair step had to insert.
    pub inserted_endmodules: usize,
}

pub fn apply(text: &str) -> Postprocessed {
    let mut lines: Vec<&str> = text
        .lines()
        .filter(|line| !RESIDUE.is_match(line))
        .collect();

    let module_starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| MODULE_WORD.is_match(line) && !ENDMODULE_WORD.is_match(line))
        .map(|(i, _)| i)
        .collect();

    let mut inserted = 0;
    for (pos, &start) in module_starts.iter().enumerate().rev() {
        let next_start = module_starts
            .get(pos + 1)
            .copied()
            .unwrap_or(lines.len());
        let closed = lines[start + 1..next_start]
            .iter()
            .any(|line| ENDMODULE_WORD.is_match(line));
        if !closed {
            lines.insert(next_start, "endmodule");
            inserted += 1;
        }
    }

    let text = if lines.is_empty() {
        String::new()
    } else {
        let mut joined = lines.join("\n");
        joined.push('\n');
        joined
    };
    Postprocessed {
        text,
        inserted_endmodules: inserted,
    }
}
