//! Single- and dual-stimulus runs
//!
//! A run is an acquisition phase followed by an extinction phase. The phase
//! boundary only changes the reinforcement probability; V carries straight
//! across it.

use crate::config::{DualRunConfig, RunConfig};
use crate::error::ConfigError;
use crate::outcome::OutcomeSource;
use crate::recurrence::select_rate;
use crate::trajectory::{DualTrajectory, Trajectory};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Acquisition,
    Extinction,
}

impl RunConfig {
    /// Phases in trial order with their lengths and reinforcement probabilities.
    pub fn phases(&self) -> [(Phase, usize, f64); 2] {
        [
            (Phase::Acquisition, self.n_acq, self.p_us_acq),
            (Phase::Extinction, self.n_ext, self.p_us_ext),
        ]
    }
}

/// Something that can produce one complete run from an outcome stream.
pub trait Simulator: Sync {
    type Output: Send;

    fn validate(&self) -> Result<(), ConfigError>;

    /// Run without re-checking parameters. Callers must have validated.
    fn run_unchecked<S: OutcomeSource + ?Sized>(&self, source: &mut S) -> Self::Output;

    fn run<S: OutcomeSource + ?Sized>(&self, source: &mut S) -> Result<Self::Output, ConfigError> {
        self.validate()?;
        Ok(self.run_unchecked(source))
    }
}

impl Simulator for RunConfig {
    type Output = Trajectory;

    fn validate(&self) -> Result<(), ConfigError> {
        RunConfig::validate(self)
    }

    fn run_unchecked<S: OutcomeSource + ?Sized>(&self, source: &mut S) -> Trajectory {
        let rates = self.rates();
        let mut history = Trajectory::with_capacity(self.total_trials());
        let mut v = 0.0;

        for (phase, trials, p_us) in self.phases() {
            trace!(?phase, trials, p_us, "Phase start");
            for _ in 0..trials {
                let r = source.draw(p_us);
                v = rates.update(v, r);
                history.push(v);
            }
        }

        history
    }
}

impl Simulator for DualRunConfig {
    type Output = DualTrajectory;

    fn validate(&self) -> Result<(), ConfigError> {
        DualRunConfig::validate(self)
    }

    fn run_unchecked<S: OutcomeSource + ?Sized>(&self, source: &mut S) -> DualTrajectory {
        let run = &self.run;
        let trials = run.total_trials();
        let mut cs = Trajectory::with_capacity(trials);
        let mut gs = Trajectory::with_capacity(trials);
        let mut v_cs = 0.0;
        let mut v_gs = 0.0;

        for (phase, n, p_us) in run.phases() {
            trace!(?phase, trials = n, p_us, g = self.g, "Phase start");
            for _ in 0..n {
                // One draw per trial: both stimuli see the same event.
                let r = source.draw(p_us);

                let delta_cs = r - v_cs;
                let alpha_cs = select_rate(delta_cs, run.alpha_pos, run.alpha_neg);
                v_cs += alpha_cs * delta_cs;

                // GS borrows the CS step size, whatever the sign of its own error.
                let delta_gs = r - v_gs;
                v_gs += (self.g * alpha_cs) * delta_gs;

                cs.push(v_cs);
                gs.push(v_gs);
            }
        }

        DualTrajectory { cs, gs }
    }
}

/// Validate `config`, then run one stimulus through acquisition and extinction.
pub fn run_single<S: OutcomeSource + ?Sized>(
    config: &RunConfig,
    source: &mut S,
) -> Result<Trajectory, ConfigError> {
    config.run(source)
}

/// Validate `config`, then run the coupled CS/GS pair.
pub fn run_dual<S: OutcomeSource + ?Sized>(
    config: &DualRunConfig,
    source: &mut S,
) -> Result<DualTrajectory, ConfigError> {
    config.run(source)
}
