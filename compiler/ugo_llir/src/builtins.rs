//! Builtin definitions supplied to the lowering pass.
//!
//! The driver only concatenates the preamble and trampoline text; it never
//! interprets them. Builtin function names seed the Universe scope so calls
//! can resolve them.

/// Source of builtin text and names.
pub trait Builtins {
    /// Text inserted after the `; package` header line.
    fn preamble(&self) -> &str;

    /// Text appended when the module is the entry package and defines the
    /// entry function.
    fn entry_trampoline(&self) -> &str;

    /// Names callable from source (`exit`, `println`, ...).
    fn functions(&self) -> &[&str];

    fn is_builtin(&self, name: &str) -> bool {
        self.functions().iter().any(|f| *f == name)
    }
}

/// Runtime declarations of the ugo runtime library.
pub const UGO_PREAMBLE: &str = "\
declare i32 @ugo_builtin_println(i32)
declare i32 @ugo_builtin_exit(i32)
";

/// Native `main` forwarding to `main.main`.
pub const UGO_MAIN_TRAMPOLINE: &str = "
define i32 @main() {
\t%ret = call i32() @ugo_main_main()
\tret i32 %ret
}
";

/// Builtins of the standard ugo runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct UgoBuiltins;

impl Builtins for UgoBuiltins {
    fn preamble(&self) -> &str {
        UGO_PREAMBLE
    }

    fn entry_trampoline(&self) -> &str {
        UGO_MAIN_TRAMPOLINE
    }

    fn functions(&self) -> &[&str] {
        &["println", "exit"]
    }
}
