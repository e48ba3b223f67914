//! Closed-set totality checking.
//!
//! The driver runs four passes over an already type-checked [`Program`]:
//!
//! | pass | produces |
//! |---|---|
//! | `enum-inference` | per-unit enum tables |
//! | `enum-totality` | diagnostics for value switches over enums |
//! | `variant-discovery` | variant-set facts keyed by interface |
//! | `match-exhaustiveness` | diagnostics for type switches over marker interfaces |
//!
//! Passes are scheduled by their declared dependencies, and every unit is
//! visited by a pass before the next pass starts, so facts exported by
//! discovery are visible to every unit's exhaustiveness check.
//!
//! # Tracing
//!
//! Set `RUST_LOG=tally=debug` (or `tally_union=trace`, ...) and call
//! [`init_tracing`] to see skipped constructs and discovered sets.
//!
//! [`Program`]: tally_ir::Program

mod config;
mod driver;
mod error;
mod pass;
mod report;
mod schedule;

use std::sync::Once;

pub use config::{CheckConfig, ERROR_LIMIT_VAR, PASSES_VAR};
pub use driver::Driver;
pub use error::DriverError;
pub use pass::PassId;
pub use report::{Finding, PassStats, Report};
pub use schedule::Schedule;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debugging.
///
/// Call this at the start of a host program or test to enable tracing.
/// Uses the `RUST_LOG` environment variable for filtering.
///
/// # Example
///
/// ```bash
/// RUST_LOG=tally=debug cargo test -p tally
/// RUST_LOG=tally_union=trace cargo test -p tally
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
