//! The pass registry.

use std::fmt;

use tally_diagnostic::ErrorCode;

/// One analysis pass, with its declared dependencies.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum PassId {
    EnumInference,
    EnumTotality,
    VariantDiscovery,
    MatchExhaustiveness,
}

impl PassId {
    /// Every pass, in an order that respects [`requires`](PassId::requires).
    pub const ALL: [PassId; 4] = [
        PassId::EnumInference,
        PassId::EnumTotality,
        PassId::VariantDiscovery,
        PassId::MatchExhaustiveness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PassId::EnumInference => "enum-inference",
            PassId::EnumTotality => "enum-totality",
            PassId::VariantDiscovery => "variant-discovery",
            PassId::MatchExhaustiveness => "match-exhaustiveness",
        }
    }

    pub fn doc(self) -> &'static str {
        match self {
            PassId::EnumInference => {
                "find int types whose constants are declared one per line with iota"
            }
            PassId::EnumTotality => {
                "check that switches over an enum name every member; \
                 a default clause does not count"
            }
            PassId::VariantDiscovery => {
                "find interfaces with an unexported marker method and \
                 the concrete types that implement them"
            }
            PassId::MatchExhaustiveness => {
                "check that type switches over a marker interface handle every \
                 implementing type or have a default clause"
            }
        }
    }

    /// Passes whose results this pass reads.
    pub fn requires(self) -> &'static [PassId] {
        match self {
            PassId::EnumInference | PassId::VariantDiscovery => &[],
            PassId::EnumTotality => &[PassId::EnumInference],
            PassId::MatchExhaustiveness => &[PassId::VariantDiscovery],
        }
    }

    /// Whether the pass runs on units the host reported type errors for.
    pub fn run_despite_errors(self) -> bool {
        matches!(self, PassId::EnumInference | PassId::EnumTotality)
    }

    /// The diagnostic code this pass reports, if it reports any.
    pub fn reports(self) -> Option<ErrorCode> {
        match self {
            PassId::EnumTotality => Some(ErrorCode::E0001),
            PassId::MatchExhaustiveness => Some(ErrorCode::E0002),
            PassId::EnumInference | PassId::VariantDiscovery => None,
        }
    }

    /// The pass that reports `code`.
    pub fn reporting(code: ErrorCode) -> PassId {
        match code {
            ErrorCode::E0001 => PassId::EnumTotality,
            ErrorCode::E0002 => PassId::MatchExhaustiveness,
        }
    }

    pub fn from_name(name: &str) -> Option<PassId> {
        PassId::ALL.into_iter().find(|pass| pass.name() == name)
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
