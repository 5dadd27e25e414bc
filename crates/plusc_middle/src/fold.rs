//! Constant folding.
//!
//! Every addition whose operands are both literals, after their own operands
//! have been folded, is replaced by a literal holding the sum. Overflow wraps.

use plusc_ir::tree::{Expr, ExprKind, Stmt};
use plusc_ir::BinOp;

pub fn fold_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Return(expr) => Stmt::Return(fold_expr(expr)),
    }
}

pub fn fold_expr(expr: Expr) -> Expr {
    let span = expr.span;

    match expr.kind {
        ExprKind::Integer(_) => expr,

        ExprKind::BinOp { op, lhs, rhs } => {
            let lhs = fold_expr(*lhs);
            let rhs = fold_expr(*rhs);

            match (lhs.as_integer(), rhs.as_integer()) {
                (Some(a), Some(b)) => Expr::integer(fold_binop(op, a, b), span),
                _ => Expr::new(
                    ExprKind::BinOp {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    span,
                ),
            }
        }
    }
}

fn fold_binop(op: BinOp, lhs: i64, rhs: i64) -> i64 {
    match op {
        BinOp::Add => lhs.wrapping_add(rhs),
    }
}

#[cfg(test)]
mod tests {
    use plusc_ir::tree::{Expr, ExprKind, Stmt};
    use plusc_ir::BinOp;

    use super::{fold_expr, fold_stmt};

    fn parse(source: &str) -> Stmt {
        plusc_frontend::parse(&plusc_frontend::lex(source)).unwrap()
    }

    fn returned(stmt: Stmt) -> Expr {
        match stmt {
            Stmt::Return(expr) => expr,
        }
    }

    #[test]
    fn chain_folds_to_one_literal() {
        let folded = returned(fold_stmt(parse("return 1+2+3;")));

        assert_eq!(folded.as_integer(), Some(6));
        assert_eq!((folded.span.start, folded.span.end), (7, 12));
    }

    #[test]
    fn literal_is_unchanged() {
        let stmt = parse("return 7;");
        assert_eq!(fold_stmt(stmt.clone()), stmt);
    }

    #[test]
    fn folding_is_idempotent() {
        for source in ["return 5;", "return 2+3;", "return 1 + 2 + 3 + 4 + 5;"] {
            let once = fold_stmt(parse(source));
            let twice = fold_stmt(once.clone());

            assert_eq!(once, twice, "source: {source}");
        }
    }

    #[test]
    fn overflow_wraps() {
        let folded = returned(fold_stmt(parse("return 9223372036854775807 + 1;")));
        assert_eq!(folded.as_integer(), Some(i64::MIN));
    }

    #[test]
    fn nested_tree_folds_bottom_up() {
        let tree = Expr::new(
            ExprKind::BinOp {
                op: BinOp::Add,
                lhs: Box::new(Expr::new(
                    ExprKind::BinOp {
                        op: BinOp::Add,
                        lhs: Box::new(Expr::integer(1, (0..1).into())),
                        rhs: Box::new(Expr::integer(2, (2..3).into())),
                    },
                    (0..3).into(),
                )),
                rhs: Box::new(Expr::integer(3, (4..5).into())),
            },
            (0..5).into(),
        );

        assert_eq!(fold_expr(tree).as_integer(), Some(6));
    }
}
