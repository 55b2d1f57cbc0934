//! Expression types.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use crate::{ExprId, ExprRange, Name, Span};

/// Expression node.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression kinds.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Variable reference: `x`
    Ident(Name),

    /// Integer literal: `42`
    Int(i64),

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Unary operation: `-x`, `+x`
    Unary { op: UnaryOp, operand: ExprId },

    /// Parenthesized expression: `(x)`
    Paren(ExprId),

    /// Builtin call: `exit(x)`
    Call { func: Name, args: ExprRange },

    /// Placeholder left by the parser after a syntax error.
    Error,
}

impl ExprKind {
    /// Short kind label for diagnostics.
    pub const fn label(&self) -> &'static str {
        match self {
            ExprKind::Ident(_) => "identifier",
            ExprKind::Int(_) => "integer literal",
            ExprKind::Binary { .. } => "binary expression",
            ExprKind::Unary { .. } => "unary expression",
            ExprKind::Paren(_) => "parenthesized expression",
            ExprKind::Call { .. } => "call expression",
            ExprKind::Error => "error expression",
        }
    }
}
