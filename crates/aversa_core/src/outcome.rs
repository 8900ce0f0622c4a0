//! Outcome sources: where a trial's reinforcement comes from
//!
//! The simulators never own a generator. The caller hands one in, which
//! keeps runs reproducible and lets an ensemble give every run its own
//! stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces the outcome `r` for one trial given its reinforcement probability.
pub trait OutcomeSource {
    fn draw(&mut self, p_us: f64) -> f64;
}

/// Bernoulli draws: `1.0` when a uniform `[0, 1)` sample falls below `p_us`.
///
/// Exactly one sample is consumed per call, whatever the probability.
#[derive(Debug, Clone)]
pub struct SampledOutcomes<R> {
    rng: R,
}

impl<R: Rng> SampledOutcomes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl SampledOutcomes<ChaCha8Rng> {
    /// Portable, reproducible stream for a single run.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> OutcomeSource for SampledOutcomes<R> {
    fn draw(&mut self, p_us: f64) -> f64 {
        let u: f64 = self.rng.gen();
        if u < p_us {
            1.0
        } else {
            0.0
        }
    }
}

/// Replaces every draw with its expectation, `r = p_us`.
///
/// Driving a simulator with this source unrolls the recurrence
/// deterministically; see [`crate::oracle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedOutcomes;

impl OutcomeSource for ExpectedOutcomes {
    fn draw(&mut self, p_us: f64) -> f64 {
        p_us
    }
}

impl<S: OutcomeSource + ?Sized> OutcomeSource for &mut S {
    fn draw(&mut self, p_us: f64) -> f64 {
        (**self).draw(p_us)
    }
}
