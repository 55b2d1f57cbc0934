//! Statement types.

use std::fmt;

use crate::{ExprId, Name, Span, StmtRange};

/// Statement node.
///
/// For `Var`, `span.start` is the declaration-site position used to give
/// each declaration its own storage slot.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Local declaration: `var x = init` or `var x int`
    Var { name: Name, init: Option<ExprId> },

    /// Assignment to an existing variable: `x = value`
    Assign { target: Name, value: ExprId },

    /// Nested block: `{ ... }`
    Block(StmtRange),

    /// Expression evaluated for its side effects: `exit(x)`
    Expr(ExprId),

    /// Placeholder left by the parser after a syntax error.
    Error,
}

impl StmtKind {
    /// Short kind label for diagnostics.
    pub const fn label(&self) -> &'static str {
        match self {
            StmtKind::Var { .. } => "variable declaration",
            StmtKind::Assign { .. } => "assignment",
            StmtKind::Block(_) => "block",
            StmtKind::Expr(_) => "expression statement",
            StmtKind::Error => "error statement",
        }
    }
}
