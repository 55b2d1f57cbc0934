//! Instruction model for the emitted low-level IR.
//!
//! Every value is a 32-bit integer. Each [`Instr`] renders as exactly one line
//! of LLVM-flavoured text; the downstream backend consumes that text, so the
//! spelling below is a fixed contract:
//!
//! ```text
//! @ugo_main_x = global i32 0
//! declare i32 @ugo_main_f()
//! define i32 @ugo_main_main() {
//!     %local_x.pos.7 = alloca i32, align 4
//!     store i32 %t2, i32* %local_x.pos.7
//!     %t3 = load i32, i32* %local_x.pos.7, align 4
//!     %t4 = add i32 %t2, %t3
//!     %t5 = call i32(i32) @ugo_builtin_exit(i32 %t4)
//!     ret i32 0
//! }
//! ```
//!
//! Body instructions are indented with one tab by the emitter, not by
//! `Display`.

use std::fmt;

/// Virtual register holding one intermediate value.
///
/// Numbered by a single counter per compilation run; prints as `%t<n>`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct VReg(u32);

impl VReg {
    #[inline]
    pub const fn new(n: u32) -> Self {
        VReg(n)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%t{}", self.0)
    }
}

/// Operand of an instruction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Value {
    /// Result of an earlier instruction.
    Reg(VReg),
    /// Immediate constant; literals outside `i32` are rejected before this.
    Imm(i32),
}

impl Value {
    /// The implicit initializer of a declaration without one.
    pub const ZERO: Value = Value::Imm(0);
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Reg(reg) => reg.fmt(f),
            Value::Imm(n) => write!(f, "{n}"),
        }
    }
}

/// Mangled low-level name of a storage slot or function, prefix included
/// (`@ugo_main_x`, `%local_x.pos.7`, `@ugo_builtin_exit`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LlName(String);

impl LlName {
    pub fn new(name: impl Into<String>) -> Self {
        LlName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arithmetic opcodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Opcode {
    Add,
    Sub,
    Mul,
    Div,
}

impl Opcode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
        }
    }
}

/// One line of output.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Instr {
    /// Zero-initialized global slot.
    Global { slot: LlName },
    /// Declaration-only function.
    Declare { func: LlName },
    /// Opens a function definition.
    Define { func: LlName },
    /// Stack slot for a local variable.
    Alloca { slot: LlName },
    Store { value: Value, slot: LlName },
    Load { dst: VReg, slot: LlName },
    Binary {
        dst: VReg,
        op: Opcode,
        lhs: Value,
        rhs: Value,
    },
    /// Call to a one-argument builtin.
    Call { dst: VReg, func: LlName, arg: Value },
    /// Fixed `ret i32 0` at the end of every body.
    Ret,
    /// Closes a function definition.
    Close,
}

impl Instr {
    /// Whether this instruction sits inside a function body.
    pub const fn is_body(&self) -> bool {
        matches!(
            self,
            Instr::Alloca { .. }
                | Instr::Store { .. }
                | Instr::Load { .. }
                | Instr::Binary { .. }
                | Instr::Call { .. }
                | Instr::Ret
        )
    }

    /// The register this instruction defines, if any.
    pub const fn dst(&self) -> Option<VReg> {
        match self {
            Instr::Load { dst, .. } | Instr::Binary { dst, .. } | Instr::Call { dst, .. } => {
                Some(*dst)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Global { slot } => write!(f, "{slot} = global i32 0"),
            Instr::Declare { func } => write!(f, "declare i32 {func}()"),
            Instr::Define { func } => write!(f, "define i32 {func}() {{"),
            Instr::Alloca { slot } => write!(f, "{slot} = alloca i32, align 4"),
            Instr::Store { value, slot } => write!(f, "store i32 {value}, i32* {slot}"),
            Instr::Load { dst, slot } => write!(f, "{dst} = load i32, i32* {slot}, align 4"),
            Instr::Binary { dst, op, lhs, rhs } => {
                write!(f, "{dst} = {} i32 {lhs}, {rhs}", op.as_str())
            }
            Instr::Call { dst, func, arg } => write!(f, "{dst} = call i32(i32) {func}(i32 {arg})"),
            Instr::Ret => f.write_str("ret i32 0"),
            Instr::Close => f.write_str("}"),
        }
    }
}

/// Accumulates rendered output.
#[derive(Default)]
pub struct Emitter {
    buf: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one instruction line, tab-indented if it belongs to a body.
    pub fn instr(&mut self, instr: &Instr) {
        use fmt::Write as _;

        if instr.is_body() {
            self.buf.push('\t');
        }
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{instr}");
        self.buf.push('\n');
    }

    /// Append text verbatim.
    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn blank_line(&mut self) {
        self.buf.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
