//! Validation errors for simulation parameters.
//!
//! Every check runs before the first trial is drawn, so a rejected
//! configuration never yields a partial trajectory.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Probability '{field}' = {value} is out of range [0.0, 1.0]")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("Generalization coefficient {value} is out of range [0.0, 1.0]")]
    GeneralizationOutOfRange { value: f64 },

    #[error("Learning rate '{field}' must be finite, got {value}")]
    NonFiniteRate { field: &'static str, value: f64 },

    #[error("Ensemble needs at least one run")]
    ZeroRuns,

    #[error("Ensemble needs at least one worker")]
    ZeroWorkers,

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

/// Check that `value` is a probability. NaN fails the range test.
pub(crate) fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { field, value })
    }
}

pub(crate) fn check_rate(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteRate { field, value })
    }
}
