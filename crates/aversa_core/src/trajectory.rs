//! Trajectories: per-trial value estimates produced by a run

use serde::Serialize;
use std::ops::Deref;

/// Value estimate after each trial, in trial order.
///
/// Built by appending during a run; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Trajectory(Vec<f64>);

impl Trajectory {
    pub(crate) fn with_capacity(trials: usize) -> Self {
        Self(Vec::with_capacity(trials))
    }

    pub(crate) fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    pub fn final_value(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn peak(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::max)
    }

    /// Summary figures, given where extinction starts.
    pub fn summary(&self, extinction_onset: usize) -> TrajectorySummary {
        let end_of_acquisition = extinction_onset
            .checked_sub(1)
            .and_then(|i| self.0.get(i).copied());
        let final_value = self.final_value();
        let retention = match (end_of_acquisition, final_value) {
            (Some(acq), Some(last)) if acq > 0.0 && extinction_onset < self.0.len() => {
                Some(last / acq)
            }
            _ => None,
        };
        TrajectorySummary {
            trials: self.0.len(),
            peak: self.peak(),
            end_of_acquisition,
            final_value,
            retention,
        }
    }
}

impl Deref for Trajectory {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Trajectory {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Trained (CS) and generalized (GS) trajectories from one coupled run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DualTrajectory {
    pub cs: Trajectory,
    pub gs: Trajectory,
}

impl DualTrajectory {
    pub fn into_pair(self) -> (Trajectory, Trajectory) {
        (self.cs, self.gs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySummary {
    pub trials: usize,
    pub peak: Option<f64>,
    /// V on the last acquisition trial
    pub end_of_acquisition: Option<f64>,
    pub final_value: Option<f64>,
    /// Share of acquired value still present after extinction.
    /// `None` when either phase is empty or nothing was acquired.
    pub retention: Option<f64>,
}
