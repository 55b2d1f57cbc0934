//! Name mangling.
//!
//! - globals and functions: `@<prefix>_<package>_<name>`
//! - builtins: `@<prefix>_builtin_<name>`
//! - locals: `%local_<name>.pos.<position>`
//!
//! Packages and builtins occupy the same `<prefix>_` namespace; a package
//! literally named `builtin` would collide with the runtime and is the host's
//! problem to reject.

use crate::instr::LlName;

#[derive(Clone, Copy, Debug)]
pub struct Mangler<'a> {
    prefix: &'a str,
}

impl<'a> Mangler<'a> {
    pub fn new(prefix: &'a str) -> Self {
        Mangler { prefix }
    }

    /// Storage slot of a package-level variable.
    pub fn global(&self, package: &str, name: &str) -> LlName {
        LlName::new(format!("@{}_{package}_{name}", self.prefix))
    }

    /// Symbol of a function defined or declared by a package.
    pub fn function(&self, package: &str, name: &str) -> LlName {
        LlName::new(format!("@{}_{package}_{name}", self.prefix))
    }

    pub fn builtin(&self, name: &str) -> LlName {
        LlName::new(format!("@{}_builtin_{name}", self.prefix))
    }

    /// Stack slot of a local variable declared at `pos`.
    ///
    /// Two declarations of the same name at different positions never alias.
    pub fn local(&self, name: &str, pos: u32) -> LlName {
        LlName::new(format!("%local_{name}.pos.{pos}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangles_by_package_and_position() {
        let m = Mangler::new("ugo");
        assert_eq!(m.global("main", "x").as_str(), "@ugo_main_x");
        assert_eq!(m.function("util", "main").as_str(), "@ugo_util_main");
        assert_eq!(m.builtin("exit").as_str(), "@ugo_builtin_exit");
        assert_eq!(m.local("x", 12).as_str(), "%local_x.pos.12");
        assert_ne!(m.local("x", 12), m.local("x", 13));
    }

    #[test]
    fn prefix_is_configurable() {
        let m = Mangler::new("app");
        assert_eq!(m.global("main", "x").as_str(), "@app_main_x");
        assert_eq!(m.builtin("println").as_str(), "@app_builtin_println");
    }
}
