//! Driver setup errors.

use thiserror::Error;

/// Failure to build a schedule or configuration.
///
/// Checking itself never fails: findings are diagnostics in the report.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DriverError {
    #[error("unknown pass `{0}`")]
    UnknownPass(String),
    #[error("invalid value `{value}` for {var}")]
    InvalidConfig { var: &'static str, value: String },
}
