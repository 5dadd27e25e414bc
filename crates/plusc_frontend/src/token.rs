use std::fmt;

use plusc_session::diagnostics::span::Span;

use crate::NodeCopy;

#[derive(NodeCopy!)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
}

impl Token<'_> {
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme.chars().eq([symbol])
    }
}

/// Prints the token as `(Kind, "lexeme")`.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {:?})", self.kind, self.lexeme)
    }
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Integer,
    Symbol,
}

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::Symbol => "symbol",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword(_) => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Integer => "Integer",
            TokenKind::Symbol => "Symbol",
        };

        f.write_str(name)
    }
}

#[derive(NodeCopy!)]
pub enum Keyword {
    Return,
    Int,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "return" => Some(Keyword::Return),
            "int" => Some(Keyword::Int),
            _ => None,
        }
    }

    pub fn token_name(&self) -> &'static str {
        match self {
            Keyword::Return => "keyword `return`",
            Keyword::Int => "keyword `int`",
        }
    }
}
