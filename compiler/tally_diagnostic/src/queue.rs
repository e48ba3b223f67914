//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of identical findings at one position
//! - Stable ordering by unit, then position, then insertion

use rustc_hash::FxHashSet;
use tally_ir::{Span, UnitId};

use crate::{Diagnostic, ErrorCode};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further ones are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical to one already queued for the same position.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits and no deduplication (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit;
        self
    }
}

/// Queued diagnostic with metadata for sorting.
#[derive(Clone, Debug)]
struct QueuedDiagnostic {
    unit: UnitId,
    /// Insertion order, the final tie breaker.
    seq: usize,
    diagnostic: Diagnostic,
}

/// Identity used for deduplication.
type DedupKey = (UnitId, ErrorCode, Option<Span>, String);

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new(DiagnosticConfig::default());
/// queue.add(unit.id, diagnostic);
/// let sorted = queue.flush();
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    config: DiagnosticConfig,
    diagnostics: Vec<QueuedDiagnostic>,
    seen: FxHashSet<DedupKey>,
    error_count: usize,
    dropped: usize,
    next_seq: usize,
}

impl DiagnosticQueue {
    pub fn new(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..DiagnosticQueue::default()
        }
    }

    /// Queue a diagnostic reported for `unit`.
    ///
    /// Returns `false` when the diagnostic was dropped as a duplicate or
    /// because the error limit was reached.
    pub fn add(&mut self, unit: UnitId, diagnostic: Diagnostic) -> bool {
        if self.limit_reached() {
            self.dropped += 1;
            return false;
        }
        if self.config.deduplicate {
            let key = (
                unit,
                diagnostic.code,
                diagnostic.primary_span(),
                diagnostic.message.clone(),
            );
            if !self.seen.insert(key) {
                self.dropped += 1;
                return false;
            }
        }
        self.error_count += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.diagnostics.push(QueuedDiagnostic {
            unit,
            seq,
            diagnostic,
        });
        true
    }

    /// Queue every diagnostic of one unit, in order.
    pub fn extend(&mut self, unit: UnitId, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.add(unit, diagnostic);
        }
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Number of diagnostics dropped by deduplication or the error limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take every queued diagnostic, sorted by unit and position.
    pub fn flush(&mut self) -> Vec<(UnitId, Diagnostic)> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort_by_key(|queued| {
            (
                queued.unit,
                queued.diagnostic.primary_span().unwrap_or(Span::DUMMY),
                queued.seq,
            )
        });
        self.seen.clear();
        self.error_count = 0;
        diagnostics
            .into_iter()
            .map(|queued| (queued.unit, queued.diagnostic))
            .collect()
    }
}
