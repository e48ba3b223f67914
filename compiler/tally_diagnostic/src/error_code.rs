//! Error codes for all totality diagnostics.

use std::fmt;

/// Error codes for all totality diagnostics.
///
/// Format: E#### where the first digit indicates the family:
/// - E0xxx: Totality findings
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorCode {
    /// Value switch over an inferred enum misses members
    E0001,
    /// Type switch over a closed variant set misses members
    E0002,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
        }
    }

    /// One-line description, used by `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "non-total switch over enum",
            ErrorCode::E0002 => "non-total type switch over union",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
