
mod expr;

use std::num::ParseIntError;
use std::slice;

use plusc_ir::tree::Stmt;
use plusc_session::diagnostics::prelude::*;
use plusc_utils::peek::Peek;

use crate::token::{Keyword, Token, TokenKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("expected {expected}, found {} `{lexeme}`", .found.token_name())]
    Expected {
        expected: &'static str,
        found: TokenKind,
        lexeme: String,
    },

    #[error("integer literal `{lexeme}` is out of range")]
    InvalidInteger {
        lexeme: String,
        #[source]
        cause: ParseIntError,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

impl IntoDiagnostic<SourceId> for ParseError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        let label = match &self.kind {
            ParseErrorKind::UnexpectedEof { expected } => format!("expected {expected} here"),
            ParseErrorKind::Expected { expected, .. } => format!("expected {expected} here"),
            ParseErrorKind::InvalidInteger { .. } => {
                format!("does not fit in a 64-bit signed integer (max {})", i64::MAX)
            }
        };

        let diagnostic = Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_snippet(Snippet::primary(label, *source_id, self.span));

        match self.kind {
            ParseErrorKind::Expected {
                found: TokenKind::Identifier,
                ..
            } => diagnostic.with_note("variables are not supported"),
            _ => diagnostic,
        }
    }
}

/// Tokens following a complete statement. They are never compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingTokens {
    pub span: Span,
    pub terminator: Span,
}

impl TrailingTokens {
    fn new(terminator: Span, rest: &[Token]) -> Option<Self> {
        let first = rest.first()?;
        let last = rest.last()?;

        Some(Self {
            span: first.span.union(last.span),
            terminator,
        })
    }
}

impl IntoDiagnostic<SourceId> for TrailingTokens {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        Diagnostic::warning()
            .with_message("tokens after the statement are ignored")
            .with_snippet(Snippet::primary("ignored", *source_id, self.span))
            .with_snippet(Snippet::secondary(
                "statement ends here",
                *source_id,
                self.terminator,
            ))
    }
}

pub struct Parser<'t, 'src> {
    tokens: slice::Iter<'t, Token<'src>>,
    eof_span: Span,
}

impl<'t, 'src> Parser<'t, 'src> {
    pub fn new(tokens: &'t [Token<'src>]) -> Self {
        let eof = tokens.last().map_or(0, |t| t.span.end);

        Self {
            tokens: tokens.iter(),
            eof_span: Span::empty(eof),
        }
    }

    /// Parses one statement. Anything after its `;` is left unread.
    pub fn parse(self) -> ParseResult<Stmt> {
        self.parse_with_trailing().map(|(stmt, _)| stmt)
    }

    /// Like [`Parser::parse`], but also reports what was left after the `;`.
    pub fn parse_with_trailing(mut self) -> ParseResult<(Stmt, Option<TrailingTokens>)> {
        let (stmt, terminator) = self.parse_statement()?;
        let trailing = TrailingTokens::new(terminator, self.tokens.as_slice());

        Ok((stmt, trailing))
    }

    /// Returns the statement and the span of its `;`.
    fn parse_statement(&mut self) -> ParseResult<(Stmt, Span)> {
        match self.tokens.next() {
            Some(token) if token.is_keyword(Keyword::Return) => {
                let expr = self.parse_expr()?;
                let semicolon = self.expect_symbol(';')?;
                Ok((Stmt::Return(expr), semicolon.span))
            }

            other => Err(self.error_expected(Keyword::Return.token_name(), other)),
        }
    }

    fn expect_symbol(&mut self, symbol: char) -> ParseResult<&'t Token<'src>> {
        match self.tokens.peek() {
            Some(t) if t.is_symbol(symbol) => {
                self.tokens.next();
                Ok(t)
            }

            other => Err(self.error_expected(symbol_name(symbol), other)),
        }
    }

    fn eat_symbol(&mut self, symbol: char) -> bool {
        match self.tokens.peek() {
            Some(t) if t.is_symbol(symbol) => {
                self.tokens.next();
                true
            }
            _ => false,
        }
    }

    fn error_expected(&self, expected: &'static str, found: Option<&Token>) -> ParseError {
        match found {
            Some(token) => ParseError {
                kind: ParseErrorKind::Expected {
                    expected,
                    found: token.kind,
                    lexeme: token.lexeme.to_owned(),
                },
                span: token.span,
            },
            None => ParseError {
                kind: ParseErrorKind::UnexpectedEof { expected },
                span: self.eof_span,
            },
        }
    }
}

fn symbol_name(symbol: char) -> &'static str {
    match symbol {
        ';' => "`;`",
        '+' => "`+`",
        _ => "a symbol",
    }
}
