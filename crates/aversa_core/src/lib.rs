//! # Aversa core
//!
//! Threat acquisition, extinction and generalization with an asymmetric
//! Rescorla-Wagner rule.
//!
//! ## Layers
//!
//! 1. [`recurrence`]: the single-trial update, V' = V + α(r − V)
//! 2. [`simulate`]: acquisition then extinction for one stimulus, or a
//!    CS/GS pair sharing one outcome per trial
//! 3. [`ensemble`]: many independently seeded runs reduced to a per-trial mean
//!
//! The outcome stream is always supplied by the caller (see [`outcome`]);
//! nothing here holds a global generator.

pub mod config;
pub mod ensemble;
pub mod error;
pub mod oracle;
pub mod outcome;
pub mod recurrence;
pub mod scenario;
pub mod simulate;
pub mod trajectory;

pub use config::{AversaConfig, DualRunConfig, EnsembleConfig, RunConfig, SweepConfig};
pub use ensemble::{mean_of, mean_run, Accumulate, Ensemble};
pub use error::ConfigError;
pub use oracle::{expected_dual_run, expected_run};
pub use outcome::{ExpectedOutcomes, OutcomeSource, SampledOutcomes};
pub use recurrence::{select_rate, update, LearningRates};
pub use scenario::{Report, Scenario, ScenarioKind, Series};
pub use simulate::{run_dual, run_single, Phase, Simulator};
pub use trajectory::{DualTrajectory, Trajectory, TrajectorySummary};
