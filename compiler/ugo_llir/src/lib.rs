//! Lowering from the ugo AST to a linear, register-based textual IR.
//!
//! The output is LLVM-flavoured text (one global, declaration, or
//! instruction per line) consumed by a native-code backend. Every value is
//! an `i32`; there is no control flow, no type checking, and no register
//! allocation beyond unlimited virtual temporaries.
//!
//! # Architecture
//!
//! - [`Compiler`] (`module.rs`) - driver: preamble, globals, functions,
//!   entry trampoline
//! - `lower/` - expression and statement lowering over one run's state
//! - [`ScopeChain`] (`scope/`) - index-addressed stack of lexical scopes
//! - [`RegisterAllocator`] (`regs.rs`) - module-wide virtual register counter
//! - [`Instr`] (`instr.rs`) - instruction model and its text form
//! - [`Builtins`] (`builtins.rs`) - runtime preamble, trampoline, builtin names
//!
//! # Example
//!
//! ```
//! use ugo_ir::{BinaryOp, ModuleBuilder, StringInterner};
//!
//! let interner = StringInterner::new();
//! let mut b = ModuleBuilder::new(&interner, "main");
//! let one = b.int(1);
//! let two = b.int(2);
//! let sum = b.binary(BinaryOp::Add, one, two);
//! let decl = b.var("x", Some(sum));
//! let body = b.block([decl]);
//! b.function("main", Some(body));
//! let module = b.finish();
//!
//! let text = ugo_llir::compile(&module, &interner).unwrap();
//! assert!(text.contains("define i32 @ugo_main_main() {"));
//! ```
//!
//! # Debugging
//!
//! - `RUST_LOG=ugo_llir=debug` - one event per module and function
//! - `RUST_LOG=ugo_llir=trace` - also every local slot declared

pub mod builtins;
mod config;
mod error;
pub mod instr;
mod lower;
mod mangle;
mod module;
mod regs;
pub mod scope;

pub use builtins::{Builtins, UgoBuiltins};
pub use config::LowerConfig;
pub use error::LowerError;
pub use instr::{Instr, LlName, Opcode, VReg, Value};
pub use mangle::Mangler;
pub use module::Compiler;
pub use regs::RegisterAllocator;
pub use scope::{DeclSite, ScopeChain, ScopeId, Symbol};

use std::sync::Once;

use ugo_ir::{Module, StringInterner};

/// Lower `module` with the default configuration and ugo runtime builtins.
pub fn compile(module: &Module, interner: &StringInterner) -> Result<String, LowerError> {
    Compiler::default().compile(module, interner)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
