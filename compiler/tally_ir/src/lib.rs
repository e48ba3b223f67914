//! Tally IR - the read-only program model
//!
//! Everything the totality passes consume about the analyzed program:
//! - Spans for source locations
//! - Names for interned identifiers
//! - The program-wide type pool with canonical (alias-transparent) identity,
//!   method sets and structural assignability
//! - Per-unit syntax: type declarations, constant groups, function bodies,
//!   arena-allocated expressions annotated with resolved types and objects
//! - A statement visitor for locating dispatch sites
//!
//! # Ownership
//!
//! The host materializes a [`Program`] through [`ProgramBuilder`] before any
//! pass runs. Passes only ever see `&Program` / `&Unit`.

pub mod ast;
mod builder;
mod interner;
mod name;
mod span;
mod types;
mod unit;
pub mod visitor;

pub use builder::{ProgramBuilder, UnitBuilder};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use types::{
    BasicKind, Method, MethodSig, PackageId, Signature, TypeId, TypeKind, TypePool,
};
pub use unit::{Program, Unit, UnitId};
