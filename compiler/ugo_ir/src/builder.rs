//! Programmatic construction of modules.
//!
//! The parser is the usual producer of [`Module`]s. `ModuleBuilder` covers
//! hosts that synthesize code directly, and tests.
//!
//! Every node gets a fresh one-byte synthetic span at a strictly increasing
//! offset, so each `var` declaration has a distinct declaration-site
//! position.

use crate::{
    BinaryOp, Expr, ExprId, ExprKind, Function, GlobalVar, Module, Span, Stmt, StmtId, StmtKind,
    StringInterner, UnaryOp,
};

/// Incremental builder for a [`Module`].
pub struct ModuleBuilder<'i> {
    interner: &'i StringInterner,
    module: Module,
    next_pos: u32,
}

impl<'i> ModuleBuilder<'i> {
    pub fn new(interner: &'i StringInterner, package: &str) -> Self {
        ModuleBuilder {
            interner,
            module: Module::new(interner.intern(package)),
            next_pos: 0,
        }
    }

    fn next_span(&mut self) -> Span {
        let start = self.next_pos;
        self.next_pos += 1;
        Span::new(start, start + 1)
    }

    fn expr(&mut self, kind: ExprKind) -> ExprId {
        let span = self.next_span();
        self.module.arena.alloc_expr(Expr::new(kind, span))
    }

    fn stmt(&mut self, kind: StmtKind) -> StmtId {
        let span = self.next_span();
        self.module.arena.alloc_stmt(Stmt::new(kind, span))
    }

    // ===== Expressions =====

    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.interner.intern(name);
        self.expr(ExprKind::Ident(name))
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.expr(ExprKind::Int(value))
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Binary { op, left, right })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Unary { op, operand })
    }

    pub fn paren(&mut self, inner: ExprId) -> ExprId {
        self.expr(ExprKind::Paren(inner))
    }

    pub fn call(&mut self, func: &str, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let func = self.interner.intern(func);
        let args = self.module.arena.alloc_expr_list(args);
        self.expr(ExprKind::Call { func, args })
    }

    pub fn error_expr(&mut self) -> ExprId {
        self.expr(ExprKind::Error)
    }

    // ===== Statements =====

    pub fn var(&mut self, name: &str, init: Option<ExprId>) -> StmtId {
        let name = self.interner.intern(name);
        self.stmt(StmtKind::Var { name, init })
    }

    pub fn assign(&mut self, target: &str, value: ExprId) -> StmtId {
        let target = self.interner.intern(target);
        self.stmt(StmtKind::Assign { target, value })
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.stmt(StmtKind::Expr(expr))
    }

    pub fn block(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtId {
        let stmts = self.module.arena.alloc_stmt_list(stmts);
        self.stmt(StmtKind::Block(stmts))
    }

    pub fn error_stmt(&mut self) -> StmtId {
        self.stmt(StmtKind::Error)
    }

    // ===== Items =====

    /// Declare a package-level variable.
    pub fn global(&mut self, name: &str) -> &mut Self {
        let name = self.interner.intern(name);
        let span = self.next_span();
        self.module.globals.push(GlobalVar { name, span });
        self
    }

    /// Add a function; `body` must be a block statement, or `None` for a
    /// declaration.
    pub fn function(&mut self, name: &str, body: Option<StmtId>) -> &mut Self {
        let name = self.interner.intern(name);
        let span = self.next_span();
        self.module.functions.push(Function { name, body, span });
        self
    }

    pub fn finish(self) -> Module {
        self.module
    }
}
