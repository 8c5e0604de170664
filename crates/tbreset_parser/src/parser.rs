//! Recursive descent parser for the Verilog testbench subset.
//!
//! The [`TbParser`] struct provides primitive operations (advance, expect,
//! eat) and the item-level grammar. The parser is strict: the first construct
//! outside the supported subset aborts with a [`ParseError`], which is the
//! signal for the caller to fall back to the line-based cleaner. Procedural
//! bodies, port connections, and expressions are skimmed with balanced
//! delimiter tracking rather than parsed into nodes.

use crate::ast::*;
use crate::token::{Token, TokenKind};
use crate::ParseError;
use tbreset_common::{Ident, Interner};
use tbreset_source::{FileId, Span};

pub struct TbParser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
    file: FileId,
    interner: &'src Interner,
}

impl<'src> TbParser<'src> {
    /// Creates a new parser from a token stream produced by the lexer.
    ///
    /// The `tokens` must have been lexed from `source` for the given `file`.
    pub fn new(
        tokens: Vec<Token>,
        source: &'src str,
        file: FileId,
        interner: &'src Interner,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            file,
            interner,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn current_text(&self) -> &'src str {
        let span = self.current_span();
        &self.source[span.start as usize..span.end as usize]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Span of the previous token, for closing item spans after a final
    /// `expect`.
    fn prev_span(&self) -> Span {
        if self.pos == 0 {
            self.current_span()
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.expected(kind.describe()))
        }
    }

    fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        match self.current() {
            TokenKind::Identifier | TokenKind::EscapedIdentifier => {
                let ident = self.interner.get_or_intern(self.current_text());
                self.advance();
                Ok(ident)
            }
            _ => Err(self.expected("identifier")),
        }
    }

    fn expected(&self, what: &str) -> ParseError {
        ParseError {
            message: format!("expected {what}, found {}", self.current().describe()),
            span: self.current_span(),
        }
    }

    fn err_here(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            span: self.current_span(),
        }
    }

    // ========================================================================
    // Top-level grammar
    // ========================================================================

    pub fn parse_source_file(&mut self) -> Result<SourceTree, ParseError> {
        let mut items = Vec::new();
        while !self.at_eof() {
            match self.current() {
                TokenKind::Module => items.push(SourceItem::Module(self.parse_module()?)),
                TokenKind::MacroDefine => {
                    items.push(SourceItem::MacroDefine(self.current_span()));
                    self.advance();
                }
                TokenKind::Directive => {
                    items.push(SourceItem::Directive(self.current_span()));
                    self.advance();
                }
                _ => return Err(self.expected("`module` or a compiler directive")),
            }
        }
        Ok(SourceTree { items })
    }

    fn parse_module(&mut self) -> Result<ModuleDecl, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::Module)?;
        let name = self.expect_ident()?;
        // Everything up to the closing `;` of the header, including any
        // `#(...)` parameter list and the port list, is kept verbatim.
        self.skim_to_semicolon()?;
        let header_span = start.merge(self.prev_span());

        let mut items = Vec::new();
        while !self.at(TokenKind::Endmodule) {
            if self.at_eof() {
                return Err(self.err_here("unexpected end of file inside module"));
            }
            items.push(self.parse_module_item()?);
        }
        self.expect(TokenKind::Endmodule)?;
        let span = start.merge(self.prev_span());
        Ok(ModuleDecl {
            name,
            header_span,
            items,
            span,
        })
    }

    fn parse_module_item(&mut self) -> Result<ModuleItem, ParseError> {
        match self.current() {
            TokenKind::Wire
            | TokenKind::Tri
            | TokenKind::Supply0
            | TokenKind::Supply1
            | TokenKind::Reg
            | TokenKind::Integer
            | TokenKind::Real
            | TokenKind::Time
            | TokenKind::Realtime => Ok(ModuleItem::Declaration(self.parse_declaration()?)),
            TokenKind::Parameter => Ok(ModuleItem::Parameter(self.parse_parameter(false)?)),
            TokenKind::Localparam => Ok(ModuleItem::Parameter(self.parse_parameter(true)?)),
            TokenKind::Input | TokenKind::Output | TokenKind::Inout => {
                let start = self.current_span();
                self.advance();
                self.skim_to_semicolon()?;
                Ok(ModuleItem::PortDecl(start.merge(self.prev_span())))
            }
            TokenKind::Assign => {
                let start = self.current_span();
                self.advance();
                self.skim_to_semicolon()?;
                Ok(ModuleItem::ContinuousAssign(start.merge(self.prev_span())))
            }
            TokenKind::Initial => {
                let start = self.current_span();
                self.advance();
                self.skim_statement()?;
                Ok(ModuleItem::StimulusBlock(start.merge(self.prev_span())))
            }
            TokenKind::Always => {
                let start = self.current_span();
                self.advance();
                self.skim_statement()?;
                Ok(ModuleItem::AlwaysBlock(start.merge(self.prev_span())))
            }
            TokenKind::SystemIdentifier => {
                let start = self.current_span();
                let name = self.interner.get_or_intern(&self.current_text()[1..]);
                self.advance();
                if self.at(TokenKind::LParen) {
                    self.skim_parens()?;
                }
                self.expect(TokenKind::Semicolon)?;
                Ok(ModuleItem::SystemTaskCall(SystemTaskCall {
                    name,
                    span: start.merge(self.prev_span()),
                }))
            }
            TokenKind::Function => {
                let span = self.skim_region(TokenKind::Function, TokenKind::Endfunction)?;
                Ok(ModuleItem::FunctionDecl(span))
            }
            TokenKind::Task => {
                let span = self.skim_region(TokenKind::Task, TokenKind::Endtask)?;
                Ok(ModuleItem::TaskDecl(span))
            }
            TokenKind::Generate => {
                let span = self.skim_region(TokenKind::Generate, TokenKind::Endgenerate)?;
                Ok(ModuleItem::GenerateBlock(span))
            }
            TokenKind::Genvar => {
                let start = self.current_span();
                self.advance();
                self.skim_to_semicolon()?;
                Ok(ModuleItem::GenvarDecl(start.merge(self.prev_span())))
            }
            TokenKind::Defparam => {
                let start = self.current_span();
                self.advance();
                self.skim_to_semicolon()?;
                Ok(ModuleItem::DefparamDecl(start.merge(self.prev_span())))
            }
            TokenKind::MacroDefine => {
                let span = self.current_span();
                self.advance();
                Ok(ModuleItem::MacroDefine(span))
            }
            TokenKind::Directive => {
                let span = self.current_span();
                self.advance();
                Ok(ModuleItem::Directive(span))
            }
            TokenKind::Identifier | TokenKind::EscapedIdentifier => {
                Ok(ModuleItem::Instantiation(self.parse_instantiation()?))
            }
            _ => Err(self.expected("a module item")),
        }
    }

    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let start = self.current_span();
        let kind = match self.current() {
            TokenKind::Wire => DeclKind::Wire,
            TokenKind::Tri => DeclKind::Tri,
            TokenKind::Supply0 => DeclKind::Supply0,
            TokenKind::Supply1 => DeclKind::Supply1,
            TokenKind::Reg => DeclKind::Reg,
            TokenKind::Integer => DeclKind::Integer,
            TokenKind::Real => DeclKind::Real,
            TokenKind::Time => DeclKind::Time,
            TokenKind::Realtime => DeclKind::Realtime,
            _ => return Err(self.expected("a declaration keyword")),
        };
        self.advance();
        self.eat(TokenKind::Signed);
        if self.at(TokenKind::LBracket) {
            self.skim_brackets()?;
        }
        let names = self.parse_declarator_names()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Declaration {
            kind,
            names,
            span: start.merge(self.prev_span()),
        })
    }

    fn parse_parameter(&mut self, local: bool) -> Result<ParameterDecl, ParseError> {
        let start = self.current_span();
        self.advance();
        // Optional type (`parameter integer N = 4;`).
        if matches!(
            self.current(),
            TokenKind::Integer | TokenKind::Real | TokenKind::Realtime | TokenKind::Time
        ) {
            self.advance();
        }
        self.eat(TokenKind::Signed);
        if self.at(TokenKind::LBracket) {
            self.skim_brackets()?;
        }
        let names = self.parse_declarator_names()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(ParameterDecl {
            local,
            names,
            span: start.merge(self.prev_span()),
        })
    }

    /// Parses `name [dims] [= init], name [dims] [= init], ...` up to but not
    /// including the terminating `;`.
    fn parse_declarator_names(&mut self) -> Result<Vec<Ident>, ParseError> {
        let mut names = Vec::new();
        loop {
            names.push(self.expect_ident()?);
            while self.at(TokenKind::LBracket) {
                self.skim_brackets()?;
            }
            if self.eat(TokenKind::Equals) {
                self.skim_until(&[TokenKind::Comma, TokenKind::Semicolon])?;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(names)
    }

    fn parse_instantiation(&mut self) -> Result<Instantiation, ParseError> {
        let start = self.current_span();
        let module_name = self.expect_ident()?;
        let param_span = if self.at(TokenKind::Hash) {
            let pstart = self.current_span();
            self.advance();
            self.skim_parens()?;
            Some(pstart.merge(self.prev_span()))
        } else {
            None
        };
        let mut instances = Vec::new();
        loop {
            let name = self.expect_ident()?;
            // Instance arrays (`buf_t b [3:0] (...)`) keep their range out of
            // the rendered output, like the port connections.
            while self.at(TokenKind::LBracket) {
                self.skim_brackets()?;
            }
            let connections = self.parse_connections()?;
            instances.push(Instance { name, connections });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(Instantiation {
            module_name,
            param_span,
            instances,
            span: start.merge(self.prev_span()),
        })
    }

    fn parse_connections(&mut self) -> Result<Vec<Connection>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut connections = Vec::new();
        if self.eat(TokenKind::RParen) {
            return Ok(connections);
        }
        loop {
            let start = self.current_span().start;
            self.skim_until(&[TokenKind::Comma, TokenKind::RParen])?;
            let end = self.current_span().start;
            connections.push(Connection {
                span: Span::new(self.file, start.min(end), end),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(connections)
    }

    // ========================================================================
    // Skimming
    // ========================================================================

    /// Consumes one statement without building nodes, tracking `begin`/`end`
    /// and friends so nested blocks are crossed correctly.
    fn skim_statement(&mut self) -> Result<(), ParseError> {
        match self.current() {
            TokenKind::Begin => self.skim_block(TokenKind::End),
            TokenKind::Fork => self.skim_block(TokenKind::Join),
            TokenKind::If => {
                self.advance();
                self.skim_parens()?;
                self.skim_statement()?;
                if self.eat(TokenKind::Else) {
                    self.skim_statement()?;
                }
                Ok(())
            }
            TokenKind::Case | TokenKind::Casex | TokenKind::Casez => self.skim_case(),
            TokenKind::For | TokenKind::Repeat | TokenKind::While => {
                self.advance();
                self.skim_parens()?;
                self.skim_statement()
            }
            TokenKind::Wait => {
                self.advance();
                self.skim_parens()?;
                if self.eat(TokenKind::Semicolon) {
                    Ok(())
                } else {
                    self.skim_statement()
                }
            }
            TokenKind::Forever => {
                self.advance();
                self.skim_statement()
            }
            TokenKind::At => {
                self.advance();
                if self.at(TokenKind::LParen) {
                    self.skim_parens()?;
                } else {
                    // `@*` or a single event identifier.
                    self.advance();
                }
                self.skim_statement()
            }
            TokenKind::Hash => {
                self.advance();
                if self.at(TokenKind::LParen) {
                    self.skim_parens()?;
                } else {
                    self.advance();
                }
                if self.eat(TokenKind::Semicolon) {
                    Ok(())
                } else {
                    self.skim_statement()
                }
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof | TokenKind::End | TokenKind::Join | TokenKind::Endcase => {
                Err(self.expected("a statement"))
            }
            _ => self.skim_to_semicolon(),
        }
    }

    /// `begin [: label] stmt* end`, or the `fork`/`join` equivalent.
    fn skim_block(&mut self, close: TokenKind) -> Result<(), ParseError> {
        self.advance();
        if self.eat(TokenKind::Colon) {
            self.expect_ident()?;
        }
        while !self.at(close) {
            if self.at_eof() {
                return Err(self.err_here("unexpected end of file in procedural block"));
            }
            self.skim_statement()?;
        }
        self.advance();
        Ok(())
    }

    /// Skims `case (...) ... endcase` token-blind, tracking nested cases.
    fn skim_case(&mut self) -> Result<(), ParseError> {
        self.advance();
        self.skim_parens()?;
        let mut depth = 1u32;
        loop {
            match self.current() {
                TokenKind::Case | TokenKind::Casex | TokenKind::Casez => depth += 1,
                TokenKind::Endcase => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return Ok(());
                    }
                }
                TokenKind::Eof => return Err(self.err_here("unexpected end of file in case")),
                _ => {}
            }
            self.advance();
        }
    }

    /// Consumes a balanced `(...)` group. The current token must be `(`.
    fn skim_parens(&mut self) -> Result<(), ParseError> {
        if !self.at(TokenKind::LParen) {
            return Err(self.expected("`(`"));
        }
        let mut depth = 0u32;
        loop {
            match self.current() {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth -= 1,
                TokenKind::Eof => return Err(self.err_here("unclosed parenthesis")),
                _ => {}
            }
            self.advance();
            if depth == 0 {
                return Ok(());
            }
        }
    }

    /// Consumes a balanced `[...]` group. The current token must be `[`.
    fn skim_brackets(&mut self) -> Result<(), ParseError> {
        if !self.at(TokenKind::LBracket) {
            return Err(self.expected("`[`"));
        }
        let mut depth = 0u32;
        loop {
            match self.current() {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => depth -= 1,
                TokenKind::Eof => return Err(self.err_here("unclosed bracket")),
                _ => {}
            }
            self.advance();
            if depth == 0 {
                return Ok(());
            }
        }
    }

    /// Consumes everything through the next `;` at delimiter depth zero.
    fn skim_to_semicolon(&mut self) -> Result<(), ParseError> {
        self.skim_until(&[TokenKind::Semicolon])?;
        self.expect(TokenKind::Semicolon)
    }

    /// Consumes tokens up to (not including) the first terminator at
    /// delimiter depth zero.
    fn skim_until(&mut self, terminators: &[TokenKind]) -> Result<(), ParseError> {
        let mut depth = 0u32;
        loop {
            let kind = self.current();
            if depth == 0 && terminators.contains(&kind) {
                return Ok(());
            }
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        return Err(self.expected("a terminator"));
                    }
                    depth -= 1;
                }
                TokenKind::Eof => return Err(self.err_here("unexpected end of file")),
                TokenKind::End
                | TokenKind::Endcase
                | TokenKind::Endmodule
                | TokenKind::Endfunction
                | TokenKind::Endtask
                    if depth == 0 =>
                {
                    return Err(self.expected("`;`"));
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skims `open ... close` as a flat region with nesting of the same pair.
    fn skim_region(&mut self, open: TokenKind, close: TokenKind) -> Result<Span, ParseError> {
        let start = self.current_span();
        let mut depth = 0u32;
        loop {
            let kind = self.current();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                self.advance();
                if depth == 0 {
                    return Ok(start.merge(self.prev_span()));
                }
                continue;
            } else if kind == TokenKind::Eof {
                return Err(self.err_here(format!("unclosed {}", open.describe())));
            }
            self.advance();
        }
    }
}
