//! Source-like rendering of AST nodes for diagnostics.
//!
//! Output is compact and single-line: `x + (1 * 2)`, `var x = 1`,
//! `{ var y; exit(y) }`. It is not a formatter; whitespace and comments
//! from the parsed text are not preserved.
//!
//! Nodes nested deeper than [`MAX_DISPLAY_DEPTH`] print as `...`, which
//! keeps rendering of arbitrarily deep trees within a fixed stack budget.

use std::fmt;

use super::{ExprKind, StmtKind};
use crate::{ExprArena, ExprId, StmtId, StringInterner};

/// Nesting depth past which subtrees are elided.
pub const MAX_DISPLAY_DEPTH: u32 = 32;

/// Placeholder for an elided subtree.
const ELIDED: &str = "...";

/// Displays an expression subtree.
pub struct DisplayExpr<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    id: ExprId,
}

/// Displays a statement subtree.
pub struct DisplayStmt<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    id: StmtId,
}

impl ExprArena {
    pub fn display_expr<'a>(&'a self, id: ExprId, interner: &'a StringInterner) -> DisplayExpr<'a> {
        DisplayExpr {
            arena: self,
            interner,
            id,
        }
    }

    pub fn display_stmt<'a>(&'a self, id: StmtId, interner: &'a StringInterner) -> DisplayStmt<'a> {
        DisplayStmt {
            arena: self,
            interner,
            id,
        }
    }
}

fn write_expr(
    f: &mut fmt::Formatter<'_>,
    arena: &ExprArena,
    interner: &StringInterner,
    id: ExprId,
    depth: u32,
) -> fmt::Result {
    if depth > MAX_DISPLAY_DEPTH {
        return f.write_str(ELIDED);
    }
    let depth = depth + 1;
    match arena.get_expr(id).kind {
        ExprKind::Ident(name) => f.write_str(interner.lookup(name)),
        ExprKind::Int(value) => write!(f, "{value}"),
        ExprKind::Binary { op, left, right } => {
            write_expr(f, arena, interner, left, depth)?;
            write!(f, " {} ", op.as_symbol())?;
            write_expr(f, arena, interner, right, depth)
        }
        ExprKind::Unary { op, operand } => {
            f.write_str(op.as_symbol())?;
            write_expr(f, arena, interner, operand, depth)
        }
        ExprKind::Paren(inner) => {
            f.write_str("(")?;
            write_expr(f, arena, interner, inner, depth)?;
            f.write_str(")")
        }
        ExprKind::Call { func, args } => {
            write!(f, "{}(", interner.lookup(func))?;
            for (i, &arg) in arena.get_expr_list(args).iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expr(f, arena, interner, arg, depth)?;
            }
            f.write_str(")")
        }
        ExprKind::Error => f.write_str("<error>"),
    }
}

fn write_stmt(
    f: &mut fmt::Formatter<'_>,
    arena: &ExprArena,
    interner: &StringInterner,
    id: StmtId,
    depth: u32,
) -> fmt::Result {
    if depth > MAX_DISPLAY_DEPTH {
        return f.write_str(ELIDED);
    }
    let depth = depth + 1;
    match arena.get_stmt(id).kind {
        StmtKind::Var { name, init } => {
            write!(f, "var {}", interner.lookup(name))?;
            if let Some(init) = init {
                f.write_str(" = ")?;
                write_expr(f, arena, interner, init, depth)?;
            }
            Ok(())
        }
        StmtKind::Assign { target, value } => {
            write!(f, "{} = ", interner.lookup(target))?;
            write_expr(f, arena, interner, value, depth)
        }
        StmtKind::Block(stmts) => {
            let stmts = arena.get_stmt_list(stmts);
            if stmts.is_empty() {
                return f.write_str("{}");
            }
            f.write_str("{ ")?;
            for (i, &stmt) in stmts.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                write_stmt(f, arena, interner, stmt, depth)?;
            }
            f.write_str(" }")
        }
        StmtKind::Expr(expr) => write_expr(f, arena, interner, expr, depth),
        StmtKind::Error => f.write_str("<error>"),
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.arena, self.interner, self.id, 0)
    }
}

impl fmt::Display for DisplayStmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stmt(f, self.arena, self.interner, self.id, 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::MAX_DISPLAY_DEPTH;
    use crate::{BinaryOp, ModuleBuilder, StringInterner, UnaryOp};

    #[test]
    fn renders_nested_expression() {
        let interner = StringInterner::new();
        let mut b = ModuleBuilder::new(&interner, "main");
        let one = b.int(1);
        let two = b.int(2);
        let mul = b.binary(BinaryOp::Mul, one, two);
        let paren = b.paren(mul);
        let x = b.ident("x");
        let neg = b.unary(UnaryOp::Neg, x);
        let sum = b.binary(BinaryOp::Add, neg, paren);
        let module = b.finish();
        assert_eq!(
            module.arena.display_expr(sum, &interner).to_string(),
            "-x + (1 * 2)"
        );
    }

    #[test]
    fn renders_statements() {
        let interner = StringInterner::new();
        let mut b = ModuleBuilder::new(&interner, "main");
        let one = b.int(1);
        let decl = b.var("x", Some(one));
        let bare = b.var("y", None);
        let x = b.ident("x");
        let zero = b.int(0);
        let call = b.call("exit", [x, zero]);
        let call_stmt = b.expr_stmt(call);
        let inner = b.block([]);
        let block = b.block([decl, bare, inner, call_stmt]);
        let module = b.finish();
        assert_eq!(
            module.arena.display_stmt(block, &interner).to_string(),
            "{ var x = 1; var y; {}; exit(x, 0) }"
        );
    }

    #[test]
    fn elides_past_max_depth() {
        let interner = StringInterner::new();
        let mut b = ModuleBuilder::new(&interner, "main");
        let mut expr = b.int(0);
        for _ in 0..200_000 {
            expr = b.paren(expr);
        }
        let module = b.finish();

        let open: String = (0..=MAX_DISPLAY_DEPTH).map(|_| '(').collect();
        let close: String = (0..=MAX_DISPLAY_DEPTH).map(|_| ')').collect();
        let expected = format!("{open}...{close}");
        assert_eq!(module.arena.display_expr(expr, &interner).to_string(), expected);
    }

    #[test]
    fn shallow_trees_are_not_elided() {
        let interner = StringInterner::new();
        let mut b = ModuleBuilder::new(&interner, "main");
        let mut expr = b.int(7);
        for _ in 0..MAX_DISPLAY_DEPTH {
            expr = b.paren(expr);
        }
        let module = b.finish();

        let text = module.arena.display_expr(expr, &interner).to_string();
        assert!(text.contains('7') && !text.contains("..."), "{text}");
    }
}
