//! Diagnostic system for totality findings.
//!
//! Every non-total dispatch is reported as a [`Diagnostic`] carrying:
//! - An error code for searchability
//! - A clear message naming what is missing
//! - A primary span at the dispatch site
//!
//! Diagnostics are collected per run in a [`DiagnosticQueue`], which
//! applies the configured limits and deduplication and hands them back
//! sorted by unit and position.

mod diagnostic;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
