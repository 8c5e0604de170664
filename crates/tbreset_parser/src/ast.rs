//! Syntax tree for the Verilog testbench subset.
//!
//! The tree is deliberately shallow. Cleaning only needs to classify each
//! module item and know its source span; procedural bodies, expressions, and
//! port connections are kept as spans into the original text rather than being
//! parsed into full nodes.

use serde::{Deserialize, Serialize};
use tbreset_common::Ident;
use tbreset_source::Span;

/// A parsed source file: modules plus any top-level directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTree {
    pub items: Vec<SourceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceItem {
    Module(ModuleDecl),
    /// A top-level `` `define ``.
    MacroDefine(Span),
    /// Any other top-level backtick directive (`` `timescale ``, `` `include ``, ...).
    Directive(Span),
}

/// A module declaration.
///
/// `header_span` covers `module name ... ;` including any parameter and port
/// lists, so the emitter can reproduce the header verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDecl {
    pub name: Ident,
    pub header_span: Span,
    pub items: Vec<ModuleItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModuleItem {
    /// A variable or net declaration (`reg`, `wire`, `integer`, ...).
    Declaration(Declaration),
    /// A `parameter` or `localparam` declaration.
    Parameter(ParameterDecl),
    /// A non-ANSI port declaration in the module body (`input clk;`).
    PortDecl(Span),
    /// An `initial` block.
    StimulusBlock(Span),
    /// An `always` block.
    AlwaysBlock(Span),
    /// A continuous `assign`.
    ContinuousAssign(Span),
    /// A standalone system task call at module level.
    SystemTaskCall(SystemTaskCall),
    /// A module (or gate primitive) instantiation statement.
    Instantiation(Instantiation),
    FunctionDecl(Span),
    TaskDecl(Span),
    GenerateBlock(Span),
    GenvarDecl(Span),
    DefparamDecl(Span),
    MacroDefine(Span),
    Directive(Span),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclKind,
    pub names: Vec<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    Wire,
    Tri,
    Supply0,
    Supply1,
    Reg,
    Integer,
    Real,
    Time,
    Realtime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    /// True for `localparam`, false for `parameter`.
    pub local: bool,
    pub names: Vec<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTaskCall {
    /// Task name without the leading `$`.
    pub name: Ident,
    pub span: Span,
}

/// One instantiation statement, possibly declaring several instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instantiation {
    pub module_name: Ident,
    /// Span of `#(...)` parameter overrides, if present.
    pub param_span: Option<Span>,
    pub instances: Vec<Instance>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub name: Ident,
    pub connections: Vec<Connection>,
}

/// A single port connection, named or positional, kept as a source span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub span: Span,
}
