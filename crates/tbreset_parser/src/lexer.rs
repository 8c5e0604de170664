//! Lexical analyzer for the Verilog testbench subset.
//!
//! Converts source text into a sequence of [`Token`]s, handling case-sensitive
//! keywords, sized/based literals (`4'b1010`), string literals with C-style
//! escapes, line and block comments, escaped identifiers, system identifiers,
//! and compiler directives. Lexing is strict: the first malformed construct
//! aborts with a [`ParseError`] so the caller can fall back to the line-based
//! cleaner.

use crate::token::{lookup_keyword, Token, TokenKind};
use crate::ParseError;
use tbreset_source::{FileId, Span};

/// Lexes the given source text into a vector of tokens.
///
/// Whitespace and comments are skipped. On success the returned vector always
/// ends with a [`TokenKind::Eof`] token.
pub fn lex(source: &str, file: FileId) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        file,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    file: FileId,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            if self.pos >= self.source.len() {
                tokens.push(Token::new(
                    TokenKind::Eof,
                    Span::new(self.file, self.pos as u32, self.pos as u32),
                ));
                break;
            }
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    fn peek(&self) -> u8 {
        if self.pos < self.source.len() {
            self.source[self.pos]
        } else {
            0
        }
    }

    fn peek_at(&self, offset: usize) -> u8 {
        let idx = self.pos + offset;
        if idx < self.source.len() {
            self.source[idx]
        } else {
            0
        }
    }

    fn advance(&mut self) -> u8 {
        let b = self.source[self.pos];
        self.pos += 1;
        b
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start as u32, self.pos as u32)
    }

    fn error(&self, msg: impl Into<String>, start: usize) -> ParseError {
        ParseError {
            message: msg.into(),
            span: self.span_from(start),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.pos += 1;
                }
                b'/' if self.peek_at(1) == b'/' => {
                    while self.pos < self.source.len() && self.peek() != b'\n' {
                        self.pos += 1;
                    }
                }
                b'/' if self.peek_at(1) == b'*' => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        if self.pos >= self.source.len() {
                            return Err(self.error("unterminated block comment", start));
                        }
                        if self.peek() == b'*' && self.peek_at(1) == b'/' {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let b = self.peek();
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => Ok(self.lex_identifier()),
            b'0'..=b'9' | b'\'' => self.lex_number(),
            b'"' => self.lex_string(),
            b'\\' => self.lex_escaped_identifier(),
            b'$' => self.lex_system_identifier(),
            b'`' => self.lex_directive(),
            b'(' => Ok(self.single(TokenKind::LParen)),
            b')' => Ok(self.single(TokenKind::RParen)),
            b'[' => Ok(self.single(TokenKind::LBracket)),
            b']' => Ok(self.single(TokenKind::RBracket)),
            b'{' => Ok(self.single(TokenKind::LBrace)),
            b'}' => Ok(self.single(TokenKind::RBrace)),
            b',' => Ok(self.single(TokenKind::Comma)),
            b';' => Ok(self.single(TokenKind::Semicolon)),
            b':' => Ok(self.single(TokenKind::Colon)),
            b'.' => Ok(self.single(TokenKind::Dot)),
            b'#' => Ok(self.single(TokenKind::Hash)),
            b'@' => Ok(self.single(TokenKind::At)),
            _ if is_operator_byte(b) => Ok(self.lex_operator()),
            _ => {
                self.pos += 1;
                Err(self.error(format!("unexpected character `{}`", b as char), start))
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 1;
        Token::new(kind, self.span_from(start))
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.pos;
        while is_ident_byte(self.peek()) {
            self.pos += 1;
        }
        let text = &self.source[start..self.pos];
        let kind = std::str::from_utf8(text)
            .ok()
            .and_then(lookup_keyword)
            .unwrap_or(TokenKind::Identifier);
        Token::new(kind, self.span_from(start))
    }

    fn lex_escaped_identifier(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.pos += 1; // backslash
        while self.pos < self.source.len() && !self.peek().is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos == start + 1 {
            return Err(self.error("empty escaped identifier", start));
        }
        Ok(Token::new(TokenKind::EscapedIdentifier, self.span_from(start)))
    }

    fn lex_system_identifier(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.pos += 1; // dollar sign
        while is_ident_byte(self.peek()) {
            self.pos += 1;
        }
        if self.pos == start + 1 {
            return Err(self.error("expected name after `$`", start));
        }
        Ok(Token::new(TokenKind::SystemIdentifier, self.span_from(start)))
    }

    /// Lexes decimal, based (`8'hFF`), and real (`1.5`, `2e9`) literals.
    ///
    /// An apostrophe may begin an unsized based literal (`'b0`). Underscores
    /// are accepted anywhere a digit is.
    fn lex_number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        while self.peek().is_ascii_digit() || self.peek() == b'_' {
            self.pos += 1;
        }
        if self.peek() == b'\'' {
            self.pos += 1;
            // Optional signedness prefix, then the base character.
            if matches!(self.peek(), b's' | b'S') {
                self.pos += 1;
            }
            match self.peek() {
                b'b' | b'B' | b'o' | b'O' | b'd' | b'D' | b'h' | b'H' => self.pos += 1,
                _ => return Err(self.error("expected base after `'`", start)),
            }
            let digits = self.pos;
            while self.peek().is_ascii_alphanumeric()
                || matches!(self.peek(), b'_' | b'?')
            {
                self.pos += 1;
            }
            if self.pos == digits {
                return Err(self.error("expected digits in based literal", start));
            }
            return Ok(Token::new(TokenKind::IntLiteral, self.span_from(start)));
        }
        let mut real = false;
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            real = true;
            self.pos += 1;
            while self.peek().is_ascii_digit() || self.peek() == b'_' {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), b'e' | b'E')
            && (self.peek_at(1).is_ascii_digit()
                || (matches!(self.peek_at(1), b'+' | b'-') && self.peek_at(2).is_ascii_digit()))
        {
            real = true;
            self.pos += 1;
            if matches!(self.peek(), b'+' | b'-') {
                self.pos += 1;
            }
            while self.peek().is_ascii_digit() || self.peek() == b'_' {
                self.pos += 1;
            }
        }
        let kind = if real {
            TokenKind::RealLiteral
        } else {
            TokenKind::IntLiteral
        };
        Ok(Token::new(kind, self.span_from(start)))
    }

    fn lex_string(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.pos += 1; // opening quote
        loop {
            if self.pos >= self.source.len() || self.peek() == b'\n' {
                return Err(self.error("unterminated string literal", start));
            }
            match self.advance() {
                b'"' => break,
                b'\\' if self.pos < self.source.len() => {
                    self.pos += 1;
                }
                _ => {}
            }
        }
        Ok(Token::new(TokenKind::StringLiteral, self.span_from(start)))
    }

    /// Lexes a backtick directive as a single token spanning to end of line.
    ///
    /// `` `define `` honors backslash line continuations and gets its own
    /// token kind so the transformer can drop it.
    fn lex_directive(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.pos += 1; // backtick
        let name_start = self.pos;
        while is_ident_byte(self.peek()) {
            self.pos += 1;
        }
        if self.pos == name_start {
            return Err(self.error("expected directive name after `` ` ``", start));
        }
        let is_define = &self.source[name_start..self.pos] == b"define";
        loop {
            let line_start = self.pos;
            while self.pos < self.source.len() && self.peek() != b'\n' {
                self.pos += 1;
            }
            let line = &self.source[line_start..self.pos];
            let continued = is_define && line.last() == Some(&b'\\');
            if !continued {
                break;
            }
            if self.pos < self.source.len() {
                self.pos += 1; // newline
            }
        }
        let kind = if is_define {
            TokenKind::MacroDefine
        } else {
            TokenKind::Directive
        };
        Ok(Token::new(kind, self.span_from(start)))
    }

    fn lex_operator(&mut self) -> Token {
        let start = self.pos;
        if self.peek() == b'=' && self.peek_at(1) != b'=' {
            self.pos += 1;
            return Token::new(TokenKind::Equals, self.span_from(start));
        }
        while is_operator_byte(self.peek()) {
            self.pos += 1;
        }
        Token::new(TokenKind::Op, self.span_from(start))
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_operator_byte(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'<' | b'>' | b'!' | b'~' | b'^' | b'&' | b'|' | b'?'
            | b'='
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source, FileId::from_raw(0))
            .expect("lex failure")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_module_header() {
        assert_eq!(
            kinds("module tb;"),
            vec![
                TokenKind::Module,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_sized_literal() {
        assert_eq!(
            kinds("8'hFF 4'b10_1z 'd42"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::IntLiteral,
                TokenKind::IntLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_real_literal() {
        assert_eq!(
            kinds("1.5 2e9 3.0e-2"),
            vec![
                TokenKind::RealLiteral,
                TokenKind::RealLiteral,
                TokenKind::RealLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("wire /* block */ w; // trailing"),
            vec![
                TokenKind::Wire,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_with_escapes() {
        assert_eq!(
            kinds(r#"$display("a \"b\" c");"#),
            vec![
                TokenKind::SystemIdentifier,
                TokenKind::LParen,
                TokenKind::StringLiteral,
                TokenKind::RParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn define_spans_continuation_lines() {
        let tokens = lex("`define CHECK(x) \\\n  if (x) $stop;\nwire w;", FileId::from_raw(0))
            .expect("lex failure");
        assert_eq!(tokens[0].kind, TokenKind::MacroDefine);
        // The directive token covers both physical lines.
        assert_eq!(tokens[0].span.start, 0);
        assert!(tokens[0].span.end >= 30);
        assert_eq!(tokens[1].kind, TokenKind::Wire);
    }

    #[test]
    fn other_directives_end_at_line() {
        let tokens = lex("`timescale 1ns/1ps\nmodule tb;", FileId::from_raw(0)).expect("lex failure");
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[1].kind, TokenKind::Module);
    }

    #[test]
    fn nonblocking_assign_is_operator() {
        assert_eq!(
            kinds("q <= d == e;"),
            vec![
                TokenKind::Identifier,
                TokenKind::Op,
                TokenKind::Identifier,
                TokenKind::Op,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn blocking_assign_is_equals() {
        assert_eq!(
            kinds("a = b;"),
            vec![
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_rejected() {
        assert!(lex("$display(\"oops", FileId::from_raw(0)).is_err());
    }

    #[test]
    fn unterminated_block_comment_is_rejected() {
        assert!(lex("wire w; /* never closed", FileId::from_raw(0)).is_err());
    }
}
