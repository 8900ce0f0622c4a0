//! Trial Recurrence: the asymmetric Rescorla-Wagner step
//!
//! V' = V + α · (r − V), where α = α₊ if (r − V) > 0, else α₋
//!
//! Separate rates for rising and falling belief are how impaired safety
//! learning is modelled: with α₋ ≪ α₊ threat is acquired quickly and
//! extinguished slowly.

/// Learning-rate pair applied to positive and non-positive prediction errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningRates {
    pub positive: f64,
    pub negative: f64,
}

impl LearningRates {
    pub fn new(positive: f64, negative: f64) -> Self {
        Self { positive, negative }
    }

    /// Same rate in both directions: plain Rescorla-Wagner.
    pub fn symmetric(rate: f64) -> Self {
        Self::new(rate, rate)
    }

    pub fn select(&self, delta: f64) -> f64 {
        select_rate(delta, self.positive, self.negative)
    }

    pub fn update(&self, v_prev: f64, r: f64) -> f64 {
        update(v_prev, r, self.positive, self.negative)
    }
}

/// Pick the step size for a prediction error.
///
/// `delta == 0.0` takes the negative branch.
#[inline]
pub fn select_rate(delta: f64, alpha_pos: f64, alpha_neg: f64) -> f64 {
    if delta > 0.0 {
        alpha_pos
    } else {
        alpha_neg
    }
}

/// One trial of the recurrence. Pure; defined for all finite inputs.
#[inline]
pub fn update(v_prev: f64, r: f64, alpha_pos: f64, alpha_neg: f64) -> f64 {
    let delta = r - v_prev;
    v_prev + select_rate(delta, alpha_pos, alpha_neg) * delta
}
