//! String interner for identifier storage.
//!
//! O(1) interning and lookup. Interned strings are leaked to get a `'static`
//! lifetime; an interner lives as long as the compiler session that owns it.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
///
/// Reads take a shared lock; only the first interning of a string takes the
/// write lock.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned as [`Name::EMPTY`].
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        Self {
            table: RwLock::new(InternTable {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned
        if let Some(&idx) = self.table.read().map.get(s) {
            return Name::from_raw(idx);
        }

        let mut table = self.table.write();

        // Double-check after acquiring write lock
        if let Some(&idx) = table.map.get(s) {
            return Name::from_raw(idx);
        }

        let idx = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded {} strings", u32::MAX));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Look up the string for a Name.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    #[track_caller]
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings[name.index()]
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference-counted interner shared between compilations.
///
/// Only the string table is shared; every compilation still owns its own
/// scope chain and register counter.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
