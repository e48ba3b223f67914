//! Closed variant sets.
//!
//! An interface carrying a marker method (lowercase name, no parameters,
//! no results) closes the set of types that may implement it: only types
//! that can see the marker can satisfy it. [`discover_variants`] collects
//! those types program-wide, the driver exports each set into a
//! [`FactStore`], and [`check_type_switches`] reports type switches over a
//! marker interface that leave a variant unhandled.
//!
//! A default clause makes a type switch total.

mod discover;
mod exhaustiveness;
mod fact;

pub use discover::{discover_variants, marker_method};
pub use exhaustiveness::check_type_switches;
pub use fact::{ClosedVariantSet, FactError, FactStore};
