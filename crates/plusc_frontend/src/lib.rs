#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod token;

pub use lexer::Lexer;
pub use parser::{ParseError, ParseErrorKind, ParseResult, Parser, TrailingTokens};

use plusc_ir::tree::Stmt;
use token::Token;

derive_alias! {
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

/// Split `source` into tokens. Lexing never fails: anything that isn't a word
/// or a number becomes a one-character symbol.
pub fn lex(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).lex()
}

/// Parse exactly one statement from the front of `tokens`.
pub fn parse(tokens: &[Token]) -> ParseResult<Stmt> {
    Parser::new(tokens).parse()
}

pub fn parse_with_trailing(tokens: &[Token]) -> ParseResult<(Stmt, Option<TrailingTokens>)> {
    Parser::new(tokens).parse_with_trailing()
}
