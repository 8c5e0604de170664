//! Configuration types deserialized from `tbreset.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `tbreset.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    /// Settings for the `clean` command.
    #[serde(default)]
    pub clean: CleanConfig,
}

/// Settings controlling how a testbench is cleaned.
#[derive(Debug, Deserialize)]
pub struct CleanConfig {
    /// Which cleaning path to use.
    #[serde(default)]
    pub strategy: StrategyChoice,
    /// The suffix spliced into the output file name (`tb.sv` → `tb_cleaned.sv`).
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Default input path used when the CLI is invoked without one.
    #[serde(default)]
    pub input: Option<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyChoice::default(),
            suffix: default_suffix(),
            input: None,
        }
    }
}

fn default_suffix() -> String {
    "_cleaned".to_string()
}

/// Which cleaning path to use.
///
/// `Auto` attempts the structural path and falls back to lexical on any
/// parse or emit failure. `Structural` disables the fallback (failures
/// surface as errors); `Lexical` skips parsing entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyChoice {
    /// Structural with lexical fallback (the default).
    #[default]
    Auto,
    /// Structural only; parse/emit failures are reported as errors.
    Structural,
    /// Lexical line-based cleaning only.
    Lexical,
}
