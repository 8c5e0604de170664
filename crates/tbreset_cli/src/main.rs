//! tbreset CLI — strips test stimulus from Verilog testbenches.
//!
//! Provides `tbreset clean` for producing a module-skeleton copy of a
//! testbench with stimulus blocks, declarations, and waveform plumbing
//! removed.

#![warn(missing_docs)]

mod clean;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// tbreset — testbench skeleton extraction.
#[derive(Parser, Debug)]
#[command(name = "tbreset", version, about = "Verilog testbench cleaner")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output (includes repair notes).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `tbreset.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Clean a testbench file.
    Clean(CleanArgs),
}

/// Arguments for the `tbreset clean` subcommand.
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Testbench file to clean. Defaults to `clean.input` from the config.
    pub file: Option<String>,

    /// Transformer selection.
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Output path (default: input with the configured suffix inserted).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the cleaned text to stdout instead of a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Transformer selection for `clean`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Structural with lexical fallback.
    Auto,
    /// Structural only; fail on unparseable input.
    Structural,
    /// Line-based only.
    Lexical,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Clean(ref args) => clean::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Rough terminal detection — checks if stdout is a terminal.
fn atty_is_terminal() -> bool {
    // Use a simple heuristic: check the TERM env var.
    // In a real build we'd use the `is-terminal` crate, but this is
    // sufficient for now.
    std::env::var("TERM").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_clean_defaults() {
        let cli = Cli::parse_from(["tbreset", "clean", "tb.sv"]);
        assert!(!cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Auto);
        match cli.command {
            Command::Clean(args) => {
                assert_eq!(args.file.as_deref(), Some("tb.sv"));
                assert!(args.strategy.is_none());
                assert!(args.output.is_none());
                assert!(!args.stdout);
            }
        }
    }

    #[test]
    fn parse_clean_without_file() {
        let cli = Cli::parse_from(["tbreset", "clean"]);
        match cli.command {
            Command::Clean(args) => assert!(args.file.is_none()),
        }
    }

    #[test]
    fn parse_strategy_and_output() {
        let cli = Cli::parse_from([
            "tbreset", "clean", "tb.v", "--strategy", "lexical", "--output", "out.v",
        ]);
        match cli.command {
            Command::Clean(args) => {
                assert_eq!(args.strategy, Some(StrategyArg::Lexical));
                assert_eq!(args.output.as_deref(), Some("out.v"));
            }
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "tbreset", "--quiet", "--color", "never", "clean", "tb.sv", "--stdout",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.color, ColorChoice::Never);
        match cli.command {
            Command::Clean(args) => assert!(args.stdout),
        }
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["tbreset", "clean", "--strategy", "fast"]).is_err());
    }
}
