//! Output path derivation.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Derives the output path for a cleaned file.
///
/// A known Verilog extension keeps its place: `tb.sv` becomes
/// `tb{suffix}.sv`. Anything else gets the suffix appended to the whole file
/// name, so the input is never overwritten in place.
pub fn cleaned_path(input: &Path, suffix: &str) -> PathBuf {
    let known = matches!(
        input.extension().and_then(OsStr::to_str),
        Some("v") | Some("sv")
    );
    if known {
        let stem = input.file_stem().and_then(OsStr::to_str).unwrap_or("");
        let ext = input.extension().and_then(OsStr::to_str).unwrap_or("");
        input.with_file_name(format!("{stem}{suffix}.{ext}"))
    } else {
        let name = input
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("out");
        input.with_file_name(format!("{name}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_keep_their_place() {
        assert_eq!(
            cleaned_path(Path::new("rtl/tb.sv"), "_cleaned"),
            PathBuf::from("rtl/tb_cleaned.sv")
        );
        assert_eq!(
            cleaned_path(Path::new("tb.v"), "_cleaned"),
            PathBuf::from("tb_cleaned.v")
        );
    }

    #[test]
    fn unknown_extension_appends() {
        assert_eq!(
            cleaned_path(Path::new("tb.txt"), "_cleaned"),
            PathBuf::from("tb.txt_cleaned")
        );
        assert_eq!(
            cleaned_path(Path::new("testbench"), "_cleaned"),
            PathBuf::from("testbench_cleaned")
        );
    }

    #[test]
    fn recleaning_double_suffixes() {
        assert_eq!(
            cleaned_path(Path::new("tb_cleaned.sv"), "_cleaned"),
            PathBuf::from("tb_cleaned_cleaned.sv")
        );
    }
}
