//! Scope chain for name resolution during lowering.
//!
//! Scopes live in an index-addressed stack: each frame owns its own
//! name→[`Symbol`] map and refers to its parent by [`ScopeId`], never by
//! reference, so nothing can dangle after a frame is popped.
//!
//! Frame 0 is the Universe (builtins) and is never popped. The driver pushes
//! a module root frame for globals, one frame per function, and one per
//! nested block.

use rustc_hash::FxHashMap;
use ugo_ir::{Name, StmtId};

use crate::instr::LlName;

/// Index of a frame in the [`ScopeChain`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const UNIVERSE: ScopeId = ScopeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where a symbol was declared.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclSite {
    /// Predefined in the Universe scope.
    Builtin,
    /// Package-level variable, by index into `Module::globals`.
    Global(usize),
    /// Local `var` statement.
    Local(StmtId),
}

/// A resolved binding: source name plus the storage it lowers to.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Symbol {
    pub name: Name,
    /// Global slot, local slot, or builtin function symbol.
    pub ll_name: LlName,
    pub decl: DeclSite,
}

impl Symbol {
    pub fn builtin(name: Name, ll_name: LlName) -> Self {
        Symbol {
            name,
            ll_name,
            decl: DeclSite::Builtin,
        }
    }

    pub fn global(name: Name, ll_name: LlName, index: usize) -> Self {
        Symbol {
            name,
            ll_name,
            decl: DeclSite::Global(index),
        }
    }

    pub fn local(name: Name, ll_name: LlName, stmt: StmtId) -> Self {
        Symbol {
            name,
            ll_name,
            decl: DeclSite::Local(stmt),
        }
    }

    /// Whether this names a builtin function rather than a storage slot.
    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.decl == DeclSite::Builtin
    }
}

struct Frame {
    bindings: FxHashMap<Name, Symbol>,
    parent: Option<ScopeId>,
}

impl Frame {
    fn new(parent: Option<ScopeId>) -> Self {
        Frame {
            bindings: FxHashMap::default(),
            parent,
        }
    }
}

/// Stack of lexical scopes, innermost last.
pub struct ScopeChain {
    frames: Vec<Frame>,
}

impl ScopeChain {
    /// Create a chain holding only the Universe scope.
    pub fn new() -> Self {
        ScopeChain {
            frames: vec![Frame::new(None)],
        }
    }

    /// Create a chain whose Universe holds `symbols`.
    pub fn with_universe(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut chain = Self::new();
        for symbol in symbols {
            chain.insert(symbol);
        }
        chain
    }

    /// The innermost scope.
    #[inline]
    pub fn current(&self) -> ScopeId {
        // frames is never empty: the Universe is never popped.
        let index = u32::try_from(self.frames.len() - 1)
            .unwrap_or_else(|_| unreachable!("scope depth exceeds u32"));
        ScopeId(index)
    }

    /// Number of live scopes, Universe included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a new innermost scope.
    pub fn enter(&mut self) -> ScopeId {
        let parent = self.current();
        self.frames.push(Frame::new(Some(parent)));
        self.current()
    }

    /// Pop the innermost scope, discarding its bindings.
    ///
    /// # Panics
    /// Panics when called on the Universe scope.
    pub fn leave(&mut self) {
        assert!(
            self.frames.len() > 1,
            "ScopeChain::leave called on the Universe scope"
        );
        self.frames.pop();
    }

    /// Bind `symbol.name` in the innermost scope.
    ///
    /// A later declaration of the same name in the same scope replaces the
    /// earlier one; the replaced symbol is returned. Outer scopes are never
    /// touched.
    pub fn insert(&mut self, symbol: Symbol) -> Option<Symbol> {
        let frame = self
            .frames
            .last_mut()
            .unwrap_or_else(|| unreachable!("Universe scope is never popped"));
        frame.bindings.insert(symbol.name, symbol)
    }

    /// Look up `name` in the innermost scope only.
    pub fn lookup(&self, name: Name) -> Option<&Symbol> {
        self.frames.last()?.bindings.get(&name)
    }

    /// Look up `name` starting at the innermost scope's parent and walking
    /// outward. Returns the owning scope together with the symbol.
    pub fn lookup_parent(&self, name: Name) -> Option<(ScopeId, &Symbol)> {
        let mut scope = self.frames.last()?.parent;
        while let Some(id) = scope {
            let frame = &self.frames[id.index()];
            if let Some(symbol) = frame.bindings.get(&name) {
                return Some((id, symbol));
            }
            scope = frame.parent;
        }
        None
    }

    /// Look up `name` in the Universe scope only, ignoring any shadowing
    /// declarations in between.
    pub fn lookup_universe(&self, name: Name) -> Option<&Symbol> {
        self.frames
            .get(ScopeId::UNIVERSE.index())?
            .bindings
            .get(&name)
    }

    /// Resolve `name` innermost-first through to the Universe.
    pub fn resolve(&self, name: Name) -> Option<&Symbol> {
        self.lookup(name)
            .or_else(|| self.lookup_parent(name).map(|(_, symbol)| symbol))
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}
