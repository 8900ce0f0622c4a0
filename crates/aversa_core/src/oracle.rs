//! Deterministic oracle: the recurrence unrolled with `r = p_us`
//!
//! When both learning rates are equal the update is linear in V, so the
//! unrolled value is exactly E[V] of the stochastic run. It is also exact
//! for any rates when each phase probability is 0 or 1, since the draw is
//! then certain. Otherwise it is only an approximation.

use crate::config::{DualRunConfig, RunConfig};
use crate::error::ConfigError;
use crate::outcome::ExpectedOutcomes;
use crate::simulate::Simulator;
use crate::trajectory::{DualTrajectory, Trajectory};

pub fn expected_run(config: &RunConfig) -> Result<Trajectory, ConfigError> {
    config.run(&mut ExpectedOutcomes)
}

pub fn expected_dual_run(config: &DualRunConfig) -> Result<DualTrajectory, ConfigError> {
    config.run(&mut ExpectedOutcomes)
}

/// Whether [`expected_run`] equals E[V] for this configuration.
pub fn is_exact(config: &RunConfig) -> bool {
    let certain = |p: f64| p == 0.0 || p == 1.0;
    config.alpha_pos == config.alpha_neg || (certain(config.p_us_acq) && certain(config.p_us_ext))
}
