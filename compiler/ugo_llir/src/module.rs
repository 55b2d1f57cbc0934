//! Module driver: the single entry point of the lowering pass.
//!
//! Output layout:
//!
//! ```text
//! ; package <pkg>
//! <builtin preamble>
//!
//! <one global slot per line>
//!                               (blank line, only if there are globals)
//! <function declarations and definitions, in source order>
//! <entry trampoline, only for the entry package with an entry function>
//! ```

use ugo_ir::{Function, Module, StringInterner};

use crate::builtins::{Builtins, UgoBuiltins};
use crate::config::LowerConfig;
use crate::error::LowerError;
use crate::instr::Instr;
use crate::lower::Lowerer;
use crate::mangle::Mangler;
use crate::scope::Symbol;

/// Lowers whole modules to text.
///
/// A `Compiler` holds only configuration. Every [`compile`](Self::compile)
/// call builds its own scope chain and register counter, so one `Compiler`
/// may be reused, and compiling the same module twice yields identical text.
pub struct Compiler<B = UgoBuiltins> {
    config: LowerConfig,
    builtins: B,
}

impl Compiler {
    /// Compiler using the standard ugo runtime builtins.
    pub fn new(config: LowerConfig) -> Self {
        Self::with_builtins(config, UgoBuiltins)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(LowerConfig::default())
    }
}

impl<B: Builtins> Compiler<B> {
    pub fn with_builtins(config: LowerConfig, builtins: B) -> Self {
        Compiler { config, builtins }
    }

    pub fn config(&self) -> &LowerConfig {
        &self.config
    }

    /// Lower `module` to text.
    ///
    /// Returns the first error encountered; no partial output is produced.
    pub fn compile(&self, module: &Module, interner: &StringInterner) -> Result<String, LowerError> {
        let package = interner.lookup(module.package);
        tracing::debug!(
            package,
            globals = module.globals.len(),
            functions = module.functions.len(),
            "lowering module"
        );

        let mangler = Mangler::new(&self.config.symbol_prefix);
        let universe = self
            .builtins
            .functions()
            .iter()
            .map(|&name| Symbol::builtin(interner.intern(name), mangler.builtin(name)));
        let mut lowerer = Lowerer::new(&module.arena, interner, mangler, universe);

        // Module root scope, holding globals. Lives for the whole run.
        lowerer.scopes.enter();

        lowerer.out.raw(&format!("; package {package}\n"));
        lowerer.out.raw(self.builtins.preamble());
        lowerer.out.blank_line();

        for (index, global) in module.globals.iter().enumerate() {
            let slot = mangler.global(package, interner.lookup(global.name));
            lowerer
                .scopes
                .insert(Symbol::global(global.name, slot.clone(), index));
            lowerer.emit(&Instr::Global { slot });
        }
        if !module.globals.is_empty() {
            lowerer.out.blank_line();
        }

        for function in &module.functions {
            lowerer.lower_function(package, function)?;
        }

        if self.is_entry_module(module, interner) {
            tracing::debug!(package, "appending entry trampoline");
            lowerer.out.raw(self.builtins.entry_trampoline());
        }

        Ok(lowerer.finish())
    }

    /// Whether `module` is the entry package and defines the entry function.
    ///
    /// "Defines" means the function has a body: an entry function that is
    /// only declared (implemented elsewhere) gets no trampoline, unlike
    /// toolchains that key on the name alone.
    fn is_entry_module(&self, module: &Module, interner: &StringInterner) -> bool {
        interner.lookup(module.package) == self.config.entry_package
            && module.functions.iter().any(|f| {
                f.body.is_some() && interner.lookup(f.name) == self.config.entry_function
            })
    }
}

impl Lowerer<'_> {
    /// Lower one function: a `declare` line without a body, otherwise a full
    /// definition in its own scope.
    fn lower_function(&mut self, package: &str, function: &Function) -> Result<(), LowerError> {
        let name = self.interner.lookup(function.name);
        let func = self.mangler.function(package, name);

        let Some(body) = function.body else {
            tracing::debug!(function = name, "declaration only");
            self.emit(&Instr::Declare { func });
            return Ok(());
        };

        tracing::debug!(function = name, "lowering function");
        self.with_scope(|this| {
            this.emit(&Instr::Define { func });
            this.lower_stmt(body)?;
            this.emit(&Instr::Ret);
            this.emit(&Instr::Close);
            Ok(())
        })
    }
}
