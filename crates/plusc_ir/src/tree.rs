use std::fmt;

use plusc_diagnostic::span::Span;

use crate::{BinOp, Node};

#[derive(Node!)]
pub enum Stmt {
    Return(Expr),
}

#[derive(Node!)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn integer(value: i64, span: Span) -> Self {
        Self::new(ExprKind::Integer(value), span)
    }

    /// Builds a binary node spanning both operands.
    pub fn binop(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        let span = lhs.span.union(rhs.span);
        Self::new(
            ExprKind::BinOp {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.kind {
            ExprKind::Integer(n) => Some(n),
            ExprKind::BinOp { .. } => None,
        }
    }
}

#[derive(Node!)]
pub enum ExprKind {
    Integer(i64),

    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Return(expr) => write!(f, "return {expr};"),
        }
    }
}

/// Fully parenthesised, so the tree shape is visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ExprKind::Integer(n) => write!(f, "{n}"),
            ExprKind::BinOp { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
        }
    }
}
