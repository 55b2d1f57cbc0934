//! Arena allocation for the flat AST.
//!
//! All expressions and statements of a module live in contiguous vectors;
//! child references are `ExprId` / `StmtId` indices and lists are ranges into
//! a flattened side table.

use super::ast::{Expr, Stmt};
use super::{ExprId, ExprRange, StmtId, StmtRange};

/// Contiguous storage for all expressions and statements in a module.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Flattened expression lists (call arguments).
    expr_lists: Vec<ExprId>,
    /// All statements (indexed by `StmtId`).
    stmts: Vec<Stmt>,
    /// Flattened statement lists (block contents).
    stmt_lists: Vec<StmtId>,
}

/// Convert an arena length to a u32 index.
#[track_caller]
fn to_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena exceeded {} entries", u32::MAX))
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expressions =====

    /// Allocate expression, return ID.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_index(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate expression list, return range.
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_index(self.expr_lists.len());
        self.expr_lists.extend(exprs);
        ExprRange::new(start, to_index(self.expr_lists.len()) - start)
    }

    /// Get expression list by range.
    #[inline]
    #[track_caller]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    // ===== Statements =====

    /// Allocate statement, return ID.
    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_index(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Get statement by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    /// Allocate statement list, return range.
    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_index(self.stmt_lists.len());
        self.stmt_lists.extend(stmts);
        StmtRange::new(start, to_index(self.stmt_lists.len()) - start)
    }

    /// Get statement list by range.
    #[inline]
    #[track_caller]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }
}
