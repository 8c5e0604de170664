//! Renders a [`SourceTree`] back to Verilog text.
//!
//! Pass-through items are sliced verbatim from the original source via their
//! spans. Instantiations are the one node rendered from structure, since the
//! transformer rewrites their connection lists. Comments inside sliced spans
//! are stripped from the assembled output.

use crate::ast::*;
use tbreset_common::{InternalError, Interner, TbResult};
use tbreset_source::{Span, SourceDb};

/// Renders the tree to source text.
///
/// Returns an [`InternalError`] if any node span does not resolve inside its
/// source file, which indicates a transformer bug rather than bad input.
pub fn emit(tree: &SourceTree, db: &SourceDb, interner: &Interner) -> TbResult<String> {
    let mut out = String::new();
    for item in &tree.items {
        match item {
            SourceItem::Module(module) => emit_module(module, db, interner, &mut out)?,
            SourceItem::MacroDefine(span) | SourceItem::Directive(span) => {
                out.push_str(checked_snippet(db, *span)?);
                out.push('\n');
            }
        }
    }
    Ok(strip_comments(&out))
}

fn emit_module(
    module: &ModuleDecl,
    db: &SourceDb,
    interner: &Interner,
    out: &mut String,
) -> TbResult<()> {
    out.push_str(checked_snippet(db, module.header_span)?);
    out.push('\n');
    for item in &module.items {
        match item {
            ModuleItem::Instantiation(inst) => {
                out.push_str("  ");
                out.push_str(&render_instantiation(inst, db, interner)?);
                out.push('\n');
            }
            ModuleItem::Declaration(decl) => push_item(db, decl.span, out)?,
            ModuleItem::Parameter(param) => push_item(db, param.span, out)?,
            ModuleItem::SystemTaskCall(call) => push_item(db, call.span, out)?,
            ModuleItem::PortDecl(span)
            | ModuleItem::StimulusBlock(span)
            | ModuleItem::AlwaysBlock(span)
            | ModuleItem::ContinuousAssign(span)
            | ModuleItem::FunctionDecl(span)
            | ModuleItem::TaskDecl(span)
            | ModuleItem::GenerateBlock(span)
            | ModuleItem::GenvarDecl(span)
            | ModuleItem::DefparamDecl(span)
            | ModuleItem::MacroDefine(span)
            | ModuleItem::Directive(span) => push_item(db, *span, out)?,
        }
    }
    out.push_str("endmodule\n");
    Ok(())
}

fn push_item(db: &SourceDb, span: Span, out: &mut String) -> TbResult<()> {
    out.push_str("  ");
    out.push_str(checked_snippet(db, span)?);
    out.push('\n');
    Ok(())
}

fn render_instantiation(
    inst: &Instantiation,
    db: &SourceDb,
    interner: &Interner,
) -> TbResult<String> {
    let mut line = interner.resolve(inst.module_name).to_string();
    if let Some(param_span) = inst.param_span {
        line.push(' ');
        line.push_str(checked_snippet(db, param_span)?);
    }
    for (i, instance) in inst.instances.iter().enumerate() {
        line.push_str(if i == 0 { " " } else { ", " });
        line.push_str(interner.resolve(instance.name));
        line.push_str(" (");
        for (j, conn) in instance.connections.iter().enumerate() {
            if j > 0 {
                line.push_str(", ");
            }
            line.push_str(checked_snippet(db, conn.span)?.trim());
        }
        line.push(')');
    }
    line.push(';');
    Ok(line)
}

fn checked_snippet(db: &SourceDb, span: Span) -> Result<&str, InternalError> {
    if span.is_dummy() {
        return Err(InternalError::new("emit of dummy span"));
    }
    let file = db.get_file(span.file);
    if !file.contains_range(span.start, span.end) {
        return Err(InternalError::new(format!(
            "span {}..{} out of range for {}",
            span.start,
            span.end,
            file.path.display()
        )));
    }
    Ok(db.snippet(span))
}

/// Removes `//` and `/* */` comments, leaving string literals intact.
///
/// Line comments keep their newline; block comments are removed wholesale,
/// newlines included. Whitespace-only lines that result are left for the
/// post-processor to drop.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == '/' && chars.peek() == Some(&'/') {
            for d in chars.by_ref() {
                if d == '\n' {
                    out.push('\n');
                    break;
                }
            }
        } else if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut prev = '\0';
            for d in chars.by_ref() {
                if prev == '*' && d == '/' {
                    break;
                }
                prev = d;
            }
        } else {
            out.push(c);
        }
    }
    out
}
