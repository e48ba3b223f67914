//! Results of a checking run.

use std::fmt;

use tally_diagnostic::Diagnostic;
use tally_ir::UnitId;
use tally_union::FactStore;

use crate::PassId;

/// A diagnostic together with where and by which pass it was reported.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Finding {
    pub unit: UnitId,
    /// Path of the reporting unit.
    pub path: String,
    pub pass: PassId,
    pub diagnostic: Diagnostic,
}

/// `path:offset: error[E0001]: message`
impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diagnostic.primary_span() {
            Some(span) => write!(f, "{}:{}: {}", self.path, span.start, self.diagnostic),
            None => write!(f, "{}: {}", self.path, self.diagnostic),
        }
    }
}

/// Counters for one pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PassStats {
    pub pass: PassId,
    /// Units the pass ran on.
    pub units_checked: usize,
    /// Units skipped because the host reported type errors for them.
    pub units_skipped: usize,
    /// Diagnostics the pass produced, before limits and deduplication.
    pub diagnostics: usize,
}

impl PassStats {
    pub fn new(pass: PassId) -> Self {
        PassStats {
            pass,
            units_checked: 0,
            units_skipped: 0,
            diagnostics: 0,
        }
    }
}

/// Everything a run produced.
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// Findings sorted by unit, then position.
    pub findings: Vec<Finding>,
    /// One entry per scheduled pass, in schedule order.
    pub passes: Vec<PassStats>,
    /// Variant sets exported during the run.
    pub facts: FactStore,
    /// Diagnostics dropped by deduplication or the error limit.
    pub dropped: usize,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.findings.len()
    }

    /// Findings reported by `pass`.
    pub fn findings_for(&self, pass: PassId) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |finding| finding.pass == pass)
    }

    pub fn stats(&self, pass: PassId) -> Option<&PassStats> {
        self.passes.iter().find(|stats| stats.pass == pass)
    }
}
