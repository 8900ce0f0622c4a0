//! Ensemble Averager
//!
//! Repeats a simulator over independent outcome streams and reduces the
//! trajectories to their per-trial mean.
//!
//! ## Seeding
//!
//! Run `i` gets the `i`-th `u64` drawn from a `ChaCha8Rng` seeded with the
//! master seed, and its own `ChaCha8Rng` built from that value. No generator
//! is shared between runs, so the worker count affects wall time only.
//! With more than one worker the runs go through a dedicated rayon pool;
//! `par_iter().collect()` keeps run order and the sum is always folded in
//! that order, so a parallel mean is bit-identical to the sequential one.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::EnsembleConfig;
use crate::error::ConfigError;
use crate::outcome::SampledOutcomes;
use crate::simulate::Simulator;
use crate::trajectory::{DualTrajectory, Trajectory};

/// Run outputs that can be summed elementwise and scaled into a mean.
pub trait Accumulate {
    fn accumulate(&mut self, other: &Self);
    fn divide(&mut self, n: f64);
}

impl Accumulate for Trajectory {
    fn accumulate(&mut self, other: &Self) {
        debug_assert_eq!(self.len(), other.len(), "runs must have equal length");
        for (acc, v) in self.values_mut().iter_mut().zip(other.iter()) {
            *acc += v;
        }
    }

    fn divide(&mut self, n: f64) {
        for acc in self.values_mut() {
            *acc /= n;
        }
    }
}

impl Accumulate for DualTrajectory {
    fn accumulate(&mut self, other: &Self) {
        self.cs.accumulate(&other.cs);
        self.gs.accumulate(&other.gs);
    }

    fn divide(&mut self, n: f64) {
        self.cs.divide(n);
        self.gs.divide(n);
    }
}

/// Elementwise mean of equally shaped runs, folded in iteration order.
/// Returns `None` for an empty input.
pub fn mean_of<T, I>(runs: I) -> Option<T>
where
    T: Accumulate,
    I: IntoIterator<Item = T>,
{
    let mut runs = runs.into_iter();
    let mut total = runs.next()?;
    let mut count = 1usize;
    for run in runs {
        total.accumulate(&run);
        count += 1;
    }
    total.divide(count as f64);
    Some(total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ensemble {
    n_runs: usize,
    master_seed: u64,
    workers: usize,
}

impl Ensemble {
    pub fn new(n_runs: usize, master_seed: u64) -> Result<Self, ConfigError> {
        if n_runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        Ok(Self {
            n_runs,
            master_seed,
            workers: 1,
        })
    }

    /// Build from config; `fallback_seed` is used when the config leaves the seed unset.
    pub fn from_config(config: &EnsembleConfig, fallback_seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(config.n_runs, config.seed.unwrap_or(fallback_seed))?.with_workers(config.workers)
    }

    pub fn with_workers(mut self, workers: usize) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        self.workers = workers;
        Ok(self)
    }

    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Per-run seeds, in run order.
    pub fn run_seeds(&self) -> Vec<u64> {
        let mut master = ChaCha8Rng::seed_from_u64(self.master_seed);
        (0..self.n_runs).map(|_| master.gen()).collect()
    }

    /// Every individual run, in run order.
    pub fn runs<S: Simulator>(&self, simulator: &S) -> Result<Vec<S::Output>, ConfigError> {
        simulator.validate()?;
        let seeds = self.run_seeds();
        debug!(
            n_runs = self.n_runs,
            workers = self.workers,
            master_seed = self.master_seed,
            "Running ensemble"
        );

        if self.workers == 1 {
            return Ok(run_batch(simulator, &seeds));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| ConfigError::WorkerPool(e.to_string()))?;
        Ok(pool.install(|| {
            seeds
                .par_iter()
                .map(|&seed| run_seeded(simulator, seed))
                .collect()
        }))
    }

    /// Per-trial mean across all runs.
    pub fn mean<S>(&self, simulator: &S) -> Result<S::Output, ConfigError>
    where
        S: Simulator,
        S::Output: Accumulate,
    {
        let runs = self.runs(simulator)?;
        mean_of(runs).ok_or(ConfigError::ZeroRuns)
    }
}

fn run_seeded<S: Simulator>(simulator: &S, seed: u64) -> S::Output {
    trace!(seed, "Starting run");
    simulator.run_unchecked(&mut SampledOutcomes::seeded(seed))
}

fn run_batch<S: Simulator>(simulator: &S, seeds: &[u64]) -> Vec<S::Output> {
    seeds.iter().map(|&seed| run_seeded(simulator, seed)).collect()
}

/// Mean trajectory (or CS/GS pair) over `n_runs` independent runs.
pub fn mean_run<S>(n_runs: usize, simulator: &S, master_seed: u64) -> Result<S::Output, ConfigError>
where
    S: Simulator,
    S::Output: Accumulate,
{
    Ensemble::new(n_runs, master_seed)?.mean(simulator)
}
