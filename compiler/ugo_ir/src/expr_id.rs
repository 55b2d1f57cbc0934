//! Node IDs and ranges for the flat AST.
//!
//! - `ExprId(u32)` / `StmtId(u32)` instead of boxed children
//! - `ExprRange` / `StmtRange` for lists (call arguments, block contents)

use std::fmt;

/// Index into the expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index into the statement arena.
///
/// Also serves as the identity of a declaring statement: symbols refer back
/// to their declaration by `StmtId`, never by copy.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        StmtId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

/// Range of expressions in the flattened expression list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ExprRange {
    pub start: u32,
    pub len: u32,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        ExprRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for ExprRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprRange({}..{})", self.start, self.start + self.len)
    }
}

/// Range of statements in the flattened statement list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct StmtRange {
    pub start: u32,
    pub len: u32,
}

impl StmtRange {
    pub const EMPTY: StmtRange = StmtRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        StmtRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for StmtRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtRange({}..{})", self.start, self.start + self.len)
    }
}
