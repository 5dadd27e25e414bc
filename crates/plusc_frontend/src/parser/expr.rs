use plusc_ir::tree::Expr;
use plusc_ir::BinOp;
use plusc_utils::peek::Peek;

use super::{ParseError, ParseErrorKind, ParseResult, Parser};
use crate::token::TokenKind;

impl Parser<'_, '_> {
    /// `primary ('+' primary)*`, folded to the left.
    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        while self.eat_symbol('+') {
            let rhs = self.parse_primary()?;
            expr = Expr::binop(BinOp::Add, expr, rhs);
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.tokens.peek() {
            Some(token) if token.kind == TokenKind::Integer => {
                self.tokens.next();

                let value = token.lexeme.parse::<i64>().map_err(|cause| ParseError {
                    kind: ParseErrorKind::InvalidInteger {
                        lexeme: token.lexeme.to_owned(),
                        cause,
                    },
                    span: token.span,
                })?;

                Ok(Expr::integer(value, token.span))
            }

            other => Err(self.error_expected("an integer", other)),
        }
    }
}
