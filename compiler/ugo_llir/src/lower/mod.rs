//! AST → low-level IR lowering.
//!
//! [`Lowerer`] owns all mutable state of one compilation run: the scope
//! chain, the register allocator, and the output buffer. Nothing here is
//! shared between runs, so repeated or parallel compilations (each with its
//! own `Lowerer`) are isolated and deterministic.
//!
//! - `expr.rs` - expressions, each producing one [`Value`]
//! - `stmt.rs` - declarations, assignment, blocks, expression statements
//!
//! Every lowering method returns `Result`; the first [`LowerError`] unwinds
//! the whole walk via `?`.

mod expr;
mod stmt;

use ugo_ir::{ExprArena, Name, Span, StringInterner};

use crate::error::LowerError;
use crate::instr::{Emitter, Instr, LlName, Opcode, Value};
use crate::mangle::Mangler;
use crate::regs::RegisterAllocator;
use crate::scope::{ScopeChain, Symbol};

/// Grow the stack when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
///
/// Lowering recurses once per tree level; deeply nested expressions would
/// otherwise overflow the native stack.
#[inline]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// Lowering state for one module compilation.
pub(crate) struct Lowerer<'a> {
    pub(crate) arena: &'a ExprArena,
    pub(crate) interner: &'a StringInterner,
    pub(crate) mangler: Mangler<'a>,
    pub(crate) scopes: ScopeChain,
    pub(crate) regs: RegisterAllocator,
    pub(crate) out: Emitter,
}

impl<'a> Lowerer<'a> {
    /// Create a lowerer whose Universe scope holds `universe`.
    pub(crate) fn new(
        arena: &'a ExprArena,
        interner: &'a StringInterner,
        mangler: Mangler<'a>,
        universe: impl IntoIterator<Item = Symbol>,
    ) -> Self {
        Lowerer {
            arena,
            interner,
            mangler,
            scopes: ScopeChain::with_universe(universe),
            regs: RegisterAllocator::new(),
            out: Emitter::new(),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out.finish()
    }

    #[inline]
    pub(crate) fn emit(&mut self, instr: &Instr) {
        self.out.instr(instr);
    }

    /// Emit `dst = op lhs, rhs` into a fresh register.
    pub(crate) fn emit_binary(&mut self, op: Opcode, lhs: Value, rhs: Value) -> Value {
        let dst = self.regs.allocate();
        self.emit(&Instr::Binary { dst, op, lhs, rhs });
        Value::Reg(dst)
    }

    /// Run `f` inside a fresh innermost scope.
    ///
    /// The scope is popped whether `f` succeeds or fails.
    pub(crate) fn with_scope<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, LowerError>,
    ) -> Result<R, LowerError> {
        self.scopes.enter();
        let result = f(self);
        self.scopes.leave();
        result
    }

    /// Resolve a variable to its storage slot: current scope first, then
    /// each enclosing scope up to the Universe.
    pub(crate) fn resolve_slot(&self, name: Name, span: Span) -> Result<LlName, LowerError> {
        let symbol = match self.scopes.lookup(name) {
            Some(symbol) => symbol,
            None => match self.scopes.lookup_parent(name) {
                Some((_, symbol)) => symbol,
                None => {
                    return Err(LowerError::undefined_variable(
                        self.interner.lookup(name),
                        span,
                    ))
                }
            },
        };
        if symbol.is_builtin() {
            return Err(LowerError::unsupported(
                "identifier",
                format!(
                    "builtin function `{}` used as a variable",
                    self.interner.lookup(name)
                ),
                span,
            ));
        }
        Ok(symbol.ll_name.clone())
    }
}

#[cfg(test)]
mod tests;
