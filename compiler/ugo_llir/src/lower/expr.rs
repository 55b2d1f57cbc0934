//! Expression lowering.
//!
//! Evaluation is eager and strictly left to right. Every node allocates
//! exactly one register except the transparent ones (parentheses, unary
//! plus), which return their operand's value unchanged. No common
//! subexpression elimination: `x + x` loads `x` twice.

use ugo_ir::{BinaryOp, ExprId, ExprKind, ExprRange, Name, UnaryOp};

use super::{ensure_sufficient_stack, Lowerer};
use crate::error::LowerError;
use crate::instr::{Instr, Opcode, Value};

impl Lowerer<'_> {
    /// Lower an expression, returning the value holding its result.
    pub(crate) fn lower_expr(&mut self, id: ExprId) -> Result<Value, LowerError> {
        ensure_sufficient_stack(|| self.lower_expr_inner(id))
    }

    fn lower_expr_inner(&mut self, id: ExprId) -> Result<Value, LowerError> {
        let expr = *self.arena.get_expr(id);
        match expr.kind {
            ExprKind::Ident(name) => {
                let slot = self.resolve_slot(name, expr.span)?;
                let dst = self.regs.allocate();
                self.emit(&Instr::Load { dst, slot });
                Ok(Value::Reg(dst))
            }
            // Literals go through `add 0, n` so they share the shape of
            // computed values.
            ExprKind::Int(n) => match i32::try_from(n) {
                Ok(n) => Ok(self.emit_binary(Opcode::Add, Value::ZERO, Value::Imm(n))),
                Err(_) => Err(self.unsupported_expr(id, "integer literal outside i32 range")),
            },
            ExprKind::Binary { op, left, right } => self.lower_binary(id, op, left, right),
            ExprKind::Unary { op, operand } => self.lower_unary(id, op, operand),
            ExprKind::Paren(inner) => self.lower_expr(inner),
            ExprKind::Call { func, args } => self.lower_call(id, func, args),
            ExprKind::Error => Err(self.unsupported_expr(id, expr.kind.label())),
        }
    }

    fn lower_binary(
        &mut self,
        id: ExprId,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    ) -> Result<Value, LowerError> {
        let opcode = match op {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Sub => Opcode::Sub,
            BinaryOp::Mul => Opcode::Mul,
            BinaryOp::Div => Opcode::Div,
            BinaryOp::Mod
            | BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => return Err(self.unsupported_expr(id, "binary operator")),
        };
        let lhs = self.lower_expr(left)?;
        let rhs = self.lower_expr(right)?;
        Ok(self.emit_binary(opcode, lhs, rhs))
    }

    fn lower_unary(&mut self, id: ExprId, op: UnaryOp, operand: ExprId) -> Result<Value, LowerError> {
        match op {
            UnaryOp::Neg => {
                let value = self.lower_expr(operand)?;
                Ok(self.emit_binary(Opcode::Sub, Value::ZERO, value))
            }
            UnaryOp::Pos => self.lower_expr(operand),
            UnaryOp::Not => Err(self.unsupported_expr(id, "unary operator")),
        }
    }

    /// Lower a call to a one-argument builtin.
    ///
    /// The callee is looked up in the Universe only, so a local or global
    /// sharing a builtin's name does not affect the call.
    fn lower_call(&mut self, id: ExprId, func: Name, args: ExprRange) -> Result<Value, LowerError> {
        let arena = self.arena;
        let &[arg] = arena.get_expr_list(args) else {
            return Err(self.unsupported_expr(id, "call with other than one argument"));
        };
        let callee = match self.scopes.lookup_universe(func) {
            Some(symbol) if symbol.is_builtin() => symbol.ll_name.clone(),
            _ => return Err(self.unsupported_expr(id, "call to non-builtin function")),
        };

        let arg = self.lower_expr(arg)?;
        let dst = self.regs.allocate();
        self.emit(&Instr::Call {
            dst,
            func: callee,
            arg,
        });
        Ok(Value::Reg(dst))
    }

    fn unsupported_expr(&self, id: ExprId, kind: &'static str) -> LowerError {
        let span = self.arena.get_expr(id).span;
        let repr = self.arena.display_expr(id, self.interner).to_string();
        LowerError::unsupported(kind, repr, span)
    }
}
