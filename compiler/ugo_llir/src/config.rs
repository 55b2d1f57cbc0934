//! Lowering configuration.

/// Configuration for a compilation run.
#[derive(Clone, Debug)]
pub struct LowerConfig {
    /// Package whose modules get the entry-point trampoline.
    pub entry_package: String,
    /// Function the trampoline calls.
    pub entry_function: String,
    /// Leading component of every mangled global, function and builtin name.
    pub symbol_prefix: String,
}

impl Default for LowerConfig {
    fn default() -> Self {
        Self {
            entry_package: "main".to_string(),
            entry_function: "main".to_string(),
            symbol_prefix: "ugo".to_string(),
        }
    }
}
