use serde::{Deserialize, Serialize};
use tbreset_source::Span;

/// A single token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds for the Verilog testbench subset.
///
/// Operator tokens that carry no structural meaning for cleaning are
/// collapsed into [`TokenKind::Op`]. Compiler directives are lexed as a
/// single token spanning the whole directive line, with `` `define ``
/// (including backslash continuations) kept apart from the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords.
    Always,
    Assign,
    Begin,
    Case,
    Casex,
    Casez,
    Defparam,
    Else,
    End,
    Endcase,
    Endfunction,
    Endgenerate,
    Endmodule,
    Endtask,
    For,
    Forever,
    Fork,
    Function,
    Generate,
    Genvar,
    If,
    Initial,
    Inout,
    Input,
    Integer,
    Join,
    Localparam,
    Module,
    Output,
    Parameter,
    Real,
    Realtime,
    Reg,
    Repeat,
    Signed,
    Supply0,
    Supply1,
    Task,
    Time,
    Tri,
    Wait,
    While,
    Wire,

    // Identifiers and literals.
    Identifier,
    EscapedIdentifier,
    SystemIdentifier,
    IntLiteral,
    RealLiteral,
    StringLiteral,

    // Punctuation with structural meaning.
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Hash,
    At,
    Equals,

    /// Any other operator sequence (`+`, `==`, `<=`, `&&`, ...).
    Op,

    /// A `` `define `` directive, spanning all continuation lines.
    MacroDefine,
    /// Any other backtick directive, spanning to end of line.
    Directive,

    Eof,
}

impl TokenKind {
    /// Human readable name used in parse error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::EscapedIdentifier => "escaped identifier",
            TokenKind::SystemIdentifier => "system identifier",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::RealLiteral => "real literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Hash => "`#`",
            TokenKind::At => "`@`",
            TokenKind::Equals => "`=`",
            TokenKind::Op => "operator",
            TokenKind::MacroDefine => "`define directive",
            TokenKind::Directive => "compiler directive",
            TokenKind::Eof => "end of file",
            TokenKind::Module => "`module`",
            TokenKind::Endmodule => "`endmodule`",
            _ => "keyword",
        }
    }
}

/// Maps an identifier to its keyword kind, if it is one.
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "always" => TokenKind::Always,
        "assign" => TokenKind::Assign,
        "begin" => TokenKind::Begin,
        "case" => TokenKind::Case,
        "casex" => TokenKind::Casex,
        "casez" => TokenKind::Casez,
        "defparam" => TokenKind::Defparam,
        "else" => TokenKind::Else,
        "end" => TokenKind::End,
        "endcase" => TokenKind::Endcase,
        "endfunction" => TokenKind::Endfunction,
        "endgenerate" => TokenKind::Endgenerate,
        "endmodule" => TokenKind::Endmodule,
        "endtask" => TokenKind::Endtask,
        "for" => TokenKind::For,
        "forever" => TokenKind::Forever,
        "fork" => TokenKind::Fork,
        "function" => TokenKind::Function,
        "generate" => TokenKind::Generate,
        "genvar" => TokenKind::Genvar,
        "if" => TokenKind::If,
        "initial" => TokenKind::Initial,
        "inout" => TokenKind::Inout,
        "input" => TokenKind::Input,
        "integer" => TokenKind::Integer,
        "join" => TokenKind::Join,
        "localparam" => TokenKind::Localparam,
        "module" => TokenKind::Module,
        "output" => TokenKind::Output,
        "parameter" => TokenKind::Parameter,
        "real" => TokenKind::Real,
        "realtime" => TokenKind::Realtime,
        "reg" => TokenKind::Reg,
        "repeat" => TokenKind::Repeat,
        "signed" => TokenKind::Signed,
        "supply0" => TokenKind::Supply0,
        "supply1" => TokenKind::Supply1,
        "task" => TokenKind::Task,
        "time" => TokenKind::Time,
        "tri" => TokenKind::Tri,
        "wait" => TokenKind::Wait,
        "while" => TokenKind::While,
        "wire" => TokenKind::Wire,
        _ => return None,
    };
    Some(kind)
}
