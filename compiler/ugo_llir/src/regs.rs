//! Virtual register allocation.

use crate::instr::VReg;

/// Issues fresh virtual registers.
///
/// One allocator lives for one whole module compilation: numbering is not
/// reset between functions, so register names are unique across the module.
/// No reuse, no pooling.
#[derive(Debug, Default)]
pub struct RegisterAllocator {
    next: u32,
}

impl RegisterAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a register distinct from every earlier one.
    pub fn allocate(&mut self) -> VReg {
        let reg = VReg::new(self.next);
        self.next += 1;
        reg
    }

    /// Number of registers allocated so far.
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
