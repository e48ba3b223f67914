//! Interned string identifier.

use std::fmt;

/// Interned string identifier.
///
/// A 32-bit index into the [`StringInterner`](crate::StringInterner). Two
/// names are equal iff they were interned from the same string.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);
    /// Pre-interned discard identifier `_`.
    pub const BLANK: Name = Name(1);
    /// Pre-interned native integer type name `int`.
    pub const INT: Name = Name(2);
    /// Pre-interned auto-increment token `iota`.
    pub const IOTA: Name = Name(3);

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is the discard identifier `_`.
    #[inline]
    pub const fn is_blank(self) -> bool {
        self.0 == Self::BLANK.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

#[cfg(test)]
mod tests;
