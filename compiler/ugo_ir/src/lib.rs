//! ugo IR - AST types consumed by the lowering pass.
//!
//! This crate contains the data structures the external parser produces:
//! - Spans for source locations
//! - Names for interned identifiers
//! - A flat arena of expressions and statements
//! - `Module`, `GlobalVar` and `Function` items
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers are `Name(u32)`, compared in O(1)
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//!   into the module's [`ExprArena`]
//!
//! The lowering pass trusts the shape of these structures and performs no
//! syntactic validation.

mod arena;
pub mod ast;
mod builder;
mod expr_id;
mod interner;
mod name;
mod span;

pub use arena::ExprArena;
pub use ast::{
    BinaryOp, Expr, ExprKind, Function, GlobalVar, Module, Stmt, StmtKind, UnaryOp,
};
pub use builder::ModuleBuilder;
pub use expr_id::{ExprId, ExprRange, StmtId, StmtRange};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
