//! Run configuration.

use tally_diagnostic::DiagnosticConfig;

use crate::{DriverError, Schedule};

/// Pass names to run, comma separated.
pub const PASSES_VAR: &str = "TALLY_PASSES";
/// Maximum number of errors to report; `0` means unlimited.
pub const ERROR_LIMIT_VAR: &str = "TALLY_ERROR_LIMIT";

/// Configuration for one checking run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CheckConfig {
    /// Passes to run; `None` runs every pass.
    pub passes: Option<Vec<String>>,
    pub diagnostics: DiagnosticConfig,
}

impl CheckConfig {
    /// Read `TALLY_PASSES` and `TALLY_ERROR_LIMIT`; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, DriverError> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](CheckConfig::from_env), reading variables through
    /// `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DriverError> {
        let mut config = CheckConfig::default();
        if let Some(passes) = lookup(PASSES_VAR) {
            let names: Vec<String> = passes
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect();
            config = config.with_passes(names);
        }
        if let Some(limit) = lookup(ERROR_LIMIT_VAR) {
            let parsed = limit
                .trim()
                .parse::<usize>()
                .map_err(|_| DriverError::InvalidConfig {
                    var: ERROR_LIMIT_VAR,
                    value: limit.clone(),
                })?;
            config = config.with_error_limit(parsed);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_passes(mut self, passes: Vec<String>) -> Self {
        self.passes = Some(passes);
        self
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.diagnostics.error_limit = limit;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The schedule for the selected passes.
    pub fn schedule(&self) -> Result<Schedule, DriverError> {
        match &self.passes {
            Some(names) => Schedule::new(names.as_slice()),
            None => Ok(Schedule::all()),
        }
    }
}

#[cfg(test)]
mod tests;
