//! String interner for identifiers.
//!
//! The program model is materialized once by the host and then shared
//! read-only by every pass, so a single-owner interner is enough.

use rustc_hash::FxHashMap;

use crate::Name;

/// Strings pre-interned at fixed indices, matching the `Name` constants.
const PRE_INTERNED: [&str; 4] = ["", "_", "int", "iota"];

/// Interner mapping identifier text to [`Name`] handles.
#[derive(Clone, Debug)]
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create a new interner with the well-known names pre-interned.
    pub fn new() -> Self {
        let mut interner = StringInterner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        for s in PRE_INTERNED {
            interner.intern(s);
        }
        interner
    }

    /// Intern a string, returning its handle.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let raw = u32::try_from(self.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded {} strings", u32::MAX));
        let name = Name::from_raw(raw);
        self.strings.push(s.into());
        self.map.insert(s.into(), name);
        name
    }

    /// Look up an already-interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Resolve a handle back to its text.
    ///
    /// Unknown handles resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &str {
        self.strings
            .get(name.raw() as usize)
            .map_or("", |s| &**s)
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always false: the well-known names are pre-interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
