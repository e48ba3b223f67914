//! Closed integer enumerations.
//!
//! A defined type over `int` whose constants are declared one per line
//! with `iota` is treated as a closed enumeration. [`infer_enums`]
//! recovers those enumerations for one unit; [`check_switches`] reports
//! every value switch over one that leaves a member unlabeled.
//!
//! Enumerations are unit-local: the table is never exported, and a
//! default clause never makes a switch over an enumeration total.

mod infer;
mod totality;

pub use infer::{infer_enums, EnumCandidate, EnumTable};
pub use totality::check_switches;
