//! AST node types.
//!
//! A [`Module`] is one parsed source file: its package name, global variable
//! declarations, and functions, plus the [`ExprArena`] that owns every
//! expression and statement reachable from them.

mod display;
mod expr;
mod operators;
mod stmt;

pub use display::{DisplayExpr, DisplayStmt, MAX_DISPLAY_DEPTH};
pub use expr::{Expr, ExprKind};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{Stmt, StmtKind};

use crate::{ExprArena, Name, Span, StmtId};

/// Package-level variable declaration (`var x int`).
///
/// Globals are always zero-initialized; the grammar has no global
/// initializer expressions.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct GlobalVar {
    pub name: Name,
    pub span: Span,
}

/// Function item.
///
/// Functions take no parameters and return one `i32`. A function without a
/// body is a declaration only (implemented elsewhere, e.g. by the runtime).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Function {
    pub name: Name,
    /// Body block (`StmtKind::Block`), `None` for declarations.
    pub body: Option<StmtId>,
    pub span: Span,
}

impl Function {
    #[inline]
    pub fn is_declaration(&self) -> bool {
        self.body.is_none()
    }
}

/// A parsed source module.
#[derive(Clone, Debug, Default)]
pub struct Module {
    /// Declared package name (`package main`).
    pub package: Name,
    /// Global variables in declaration order.
    pub globals: Vec<GlobalVar>,
    /// Functions in declaration order.
    pub functions: Vec<Function>,
    /// Storage for every expression and statement in this module.
    pub arena: ExprArena,
}

impl Module {
    pub fn new(package: Name) -> Self {
        Module {
            package,
            ..Self::default()
        }
    }

    /// Find a function by name.
    pub fn function(&self, name: Name) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}
