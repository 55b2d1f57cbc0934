//! Statement lowering.

use ugo_ir::{ExprId, Name, Span, StmtId, StmtKind, StmtRange};

use super::{ensure_sufficient_stack, Lowerer};
use crate::error::LowerError;
use crate::instr::{Instr, Value};
use crate::scope::Symbol;

impl Lowerer<'_> {
    pub(crate) fn lower_stmt(&mut self, id: StmtId) -> Result<(), LowerError> {
        ensure_sufficient_stack(|| self.lower_stmt_inner(id))
    }

    fn lower_stmt_inner(&mut self, id: StmtId) -> Result<(), LowerError> {
        let stmt = *self.arena.get_stmt(id);
        match stmt.kind {
            StmtKind::Var { name, init } => self.lower_var(id, name, init, stmt.span),
            StmtKind::Assign { target, value } => {
                let slot = self.resolve_slot(target, stmt.span)?;
                let value = self.lower_expr(value)?;
                self.emit(&Instr::Store { value, slot });
                Ok(())
            }
            StmtKind::Block(stmts) => self.lower_block(stmts),
            StmtKind::Expr(expr) => {
                // Evaluated for side effects; the result is discarded.
                self.lower_expr(expr)?;
                Ok(())
            }
            StmtKind::Error => Err(LowerError::unsupported(
                stmt.kind.label(),
                self.arena.display_stmt(id, self.interner).to_string(),
                stmt.span,
            )),
        }
    }

    /// `var name = init`: one stack slot per declaration site, stored once.
    ///
    /// The initializer is lowered before the name is bound, so `var x = x`
    /// reads the enclosing `x`.
    fn lower_var(
        &mut self,
        id: StmtId,
        name: Name,
        init: Option<ExprId>,
        span: Span,
    ) -> Result<(), LowerError> {
        let value = match init {
            Some(init) => self.lower_expr(init)?,
            None => Value::ZERO,
        };

        let slot = self.mangler.local(self.interner.lookup(name), span.start);
        tracing::trace!(slot = %slot, "declare local");
        self.scopes.insert(Symbol::local(name, slot.clone(), id));

        self.emit(&Instr::Alloca { slot: slot.clone() });
        self.emit(&Instr::Store { value, slot });
        Ok(())
    }

    fn lower_block(&mut self, stmts: StmtRange) -> Result<(), LowerError> {
        let arena = self.arena;
        self.with_scope(|this| {
            for &stmt in arena.get_stmt_list(stmts) {
                this.lower_stmt(stmt)?;
            }
            Ok(())
        })
    }
}
