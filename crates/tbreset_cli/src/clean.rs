//! `tbreset clean` — the cleaning pipeline.
//!
//! 1. Load config (`tbreset.toml`, optional)
//! 2. Resolve the input file (CLI argument overrides `clean.input`)
//! 3. Load the source into a `SourceDb`
//! 4. Run the selected transformer
//! 5. Render accumulated diagnostics
//! 6. Write the skeleton to the derived or requested output path

use std::fs;
use std::path::{Path, PathBuf};

use tbreset_clean::{naming, CleanError, CleanPath, CleanStrategy, Cleaner};
use tbreset_config::{load_config, StrategyChoice};
use tbreset_diagnostics::{
    Category, Diagnostic, DiagnosticCode, DiagnosticRenderer, DiagnosticSink, Severity,
    TerminalRenderer,
};
use tbreset_source::SourceDb;

use crate::{CleanArgs, GlobalArgs, StrategyArg};

/// Runs the `tbreset clean` command. Returns exit code 0 on success.
pub fn run(args: &CleanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config_path = global.config.as_deref().unwrap_or("tbreset.toml");
    let config = load_config(Path::new(config_path))?;

    let input = match args.file.as_deref().or(config.clean.input.as_deref()) {
        Some(input) => PathBuf::from(input),
        None => {
            return Err("no input file: pass FILE or set `clean.input` in tbreset.toml".into())
        }
    };

    let mut db = SourceDb::new();
    let file = db
        .load_file(&input)
        .map_err(|e| format!("cannot read {}: {e}", input.display()))?;

    let strategy = match args.strategy {
        Some(StrategyArg::Auto) => CleanStrategy::Auto,
        Some(StrategyArg::Structural) => CleanStrategy::Structural,
        Some(StrategyArg::Lexical) => CleanStrategy::Lexical,
        None => match config.clean.strategy {
            StrategyChoice::Auto => CleanStrategy::Auto,
            StrategyChoice::Structural => CleanStrategy::Structural,
            StrategyChoice::Lexical => CleanStrategy::Lexical,
        },
    };

    let sink = DiagnosticSink::new();
    let result = Cleaner::new(strategy).clean(file, &db, &sink);

    if let Err(err) = &result {
        sink.emit(structural_failure(err));
    }
    render_diagnostics(&sink, &db, global);

    let output = match result {
        Ok(output) => output,
        Err(_) => return Ok(1),
    };

    if global.verbose {
        let which = match output.path {
            CleanPath::Structural => "structural",
            CleanPath::Lexical => "line-based",
        };
        eprintln!("   Cleaned with the {which} transformer");
    }

    if args.stdout {
        print!("{}", output.text);
        return Ok(0);
    }

    let out_path = match args.output.as_deref() {
        Some(path) => PathBuf::from(path),
        None => naming::cleaned_path(&input, &config.clean.suffix),
    };
    fs::write(&out_path, &output.text)
        .map_err(|e| format!("cannot write {}: {e}", out_path.display()))?;

    if !global.quiet {
        eprintln!("   Saved {}", out_path.display());
    }
    Ok(0)
}

fn structural_failure(err: &CleanError) -> Diagnostic {
    match err {
        CleanError::Parse(parse) => Diagnostic::error(
            DiagnosticCode::new(Category::Error, 101),
            format!("cannot clean structurally: {parse}"),
            parse.span,
        )
        .with_help("rerun with `--strategy auto` to use the line-based cleaner"),
        CleanError::Emit(internal) => Diagnostic::error(
            DiagnosticCode::new(Category::Error, 102),
            format!("cannot clean structurally: {internal}"),
            tbreset_source::Span::DUMMY,
        ),
    }
}

fn render_diagnostics(sink: &DiagnosticSink, db: &SourceDb, global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in sink.diagnostics() {
        let show = match diag.severity {
            Severity::Error => true,
            Severity::Warning => !global.quiet,
            Severity::Note => global.verbose,
        };
        if show {
            eprintln!("{}", renderer.render(&diag, db));
        }
    }
}
