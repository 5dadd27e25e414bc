
use std::str::Chars;

use plusc_session::diagnostics::span::Span;
use plusc_utils::peek::Peek;

use crate::token::{Keyword, Token, TokenKind};

pub struct Lexer<'src> {
    all: &'src str,
    chars: Chars<'src>,

    token_start: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            token_start: 0,
        }
    }

    pub fn lex(mut self) -> Vec<Token<'src>> {
        let mut tokens = vec![];
        while let Some(token) = self.lex_token() {
            tokens.push(token);
        }
        tokens
    }

    fn lex_token(&mut self) -> Option<Token<'src>> {
        loop {
            self.token_start = self.byte_pos();

            let kind = match self.chars.next()? {
                ch if ch.is_whitespace() => continue,

                ch if is_ident_start(ch) => self.lex_word(),
                ch if ch.is_ascii_digit() => self.lex_integer(),

                _ => TokenKind::Symbol,
            };

            let span = Span::new(self.token_start, self.byte_pos());

            return Some(Token {
                kind,
                lexeme: &self.all[span.start..span.end],
                span,
            });
        }
    }

    /// Digits only: signs and base prefixes aren't part of the language, and
    /// the value is checked by the parser.
    fn lex_integer(&mut self) -> TokenKind {
        self.chars.eat_while(char::is_ascii_digit);
        TokenKind::Integer
    }

    fn lex_word(&mut self) -> TokenKind {
        self.chars.eat_while(|&ch| is_ident(ch));

        let word = &self.all[self.token_start..self.byte_pos()];
        Keyword::from_word(word).map_or(TokenKind::Identifier, TokenKind::Keyword)
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
