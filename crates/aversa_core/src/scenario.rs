//! Scenario presets: labelled comparisons handed to a plotting consumer
//!
//! - Learning-rate comparison: normal vs impaired safety learning (α₋)
//! - Generalization sweep: GS curves across g
//! - CS vs GS: both stimuli for a single g
//!
//! Every report carries the extinction onset so a renderer can mark it.

use serde::Serialize;

use crate::config::{DualRunConfig, RunConfig, SweepConfig};
use crate::ensemble::Ensemble;
use crate::error::ConfigError;
use crate::oracle::{expected_dual_run, expected_run};

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioKind {
    /// One stimulus
    Single(RunConfig),
    /// Coupled run, only the GS series is reported
    Generalized(DualRunConfig),
    /// Coupled run, both series reported
    Paired(DualRunConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub label: String,
    pub kind: ScenarioKind,
}

/// One labelled numeric series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Index of the first extinction trial
    pub extinction_onset: usize,
    pub series: Vec<Series>,
}

impl Scenario {
    pub fn single(label: impl Into<String>, config: RunConfig) -> Self {
        Self {
            label: label.into(),
            kind: ScenarioKind::Single(config),
        }
    }

    pub fn run_config(&self) -> &RunConfig {
        match &self.kind {
            ScenarioKind::Single(run) => run,
            ScenarioKind::Generalized(dual) | ScenarioKind::Paired(dual) => &dual.run,
        }
    }

    /// Ensemble-mean series for this scenario.
    pub fn simulate(&self, ensemble: &Ensemble) -> Result<Vec<Series>, ConfigError> {
        match &self.kind {
            ScenarioKind::Single(run) => Ok(vec![self.series(ensemble.mean(run)?.into_inner())]),
            ScenarioKind::Generalized(dual) => {
                Ok(vec![self.series(ensemble.mean(dual)?.gs.into_inner())])
            }
            ScenarioKind::Paired(dual) => {
                let (cs, gs) = ensemble.mean(dual)?.into_pair();
                Ok(vec![
                    Series {
                        label: "CS+".to_string(),
                        values: cs.into_inner(),
                    },
                    self.series(gs.into_inner()),
                ])
            }
        }
    }

    /// Deterministic counterpart of [`Scenario::simulate`].
    pub fn expected(&self) -> Result<Vec<Series>, ConfigError> {
        match &self.kind {
            ScenarioKind::Single(run) => Ok(vec![self.series(expected_run(run)?.into_inner())]),
            ScenarioKind::Generalized(dual) => {
                Ok(vec![self.series(expected_dual_run(dual)?.gs.into_inner())])
            }
            ScenarioKind::Paired(dual) => {
                let (cs, gs) = expected_dual_run(dual)?.into_pair();
                Ok(vec![
                    Series {
                        label: "CS+".to_string(),
                        values: cs.into_inner(),
                    },
                    self.series(gs.into_inner()),
                ])
            }
        }
    }

    fn series(&self, values: Vec<f64>) -> Series {
        Series {
            label: self.label.clone(),
            values,
        }
    }
}

/// Normal vs impaired safety learning, α₊ taken from `base`.
pub fn learning_rate_comparison(base: &RunConfig, sweep: &SweepConfig) -> Vec<Scenario> {
    [
        ("Normal", sweep.normal_alpha_neg),
        ("Impaired safety learning", sweep.impaired_alpha_neg),
    ]
    .into_iter()
    .map(|(name, alpha_neg)| {
        Scenario::single(
            format!("{} (α- = {:?})", name, alpha_neg),
            base.with_rates(base.alpha_pos, alpha_neg),
        )
    })
    .collect()
}

/// One GS-only scenario per generalization coefficient.
pub fn generalization_sweep(base: &RunConfig, gs: &[f64]) -> Vec<Scenario> {
    gs.iter()
        .map(|&g| Scenario {
            label: format!("GS (g={:?})", g),
            kind: ScenarioKind::Generalized(DualRunConfig::new(*base, g)),
        })
        .collect()
}

pub fn cs_vs_gs(base: &RunConfig, g: f64) -> Scenario {
    Scenario {
        label: format!("GS (g={:?})", g),
        kind: ScenarioKind::Paired(DualRunConfig::new(*base, g)),
    }
}

impl Report {
    /// Validate every scenario, then simulate them in order.
    pub fn simulate(scenarios: &[Scenario], ensemble: &Ensemble) -> Result<Self, ConfigError> {
        Self::build(scenarios, |s| s.simulate(ensemble))
    }

    pub fn expected(scenarios: &[Scenario]) -> Result<Self, ConfigError> {
        Self::build(scenarios, Scenario::expected)
    }

    fn build<F>(scenarios: &[Scenario], mut produce: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&Scenario) -> Result<Vec<Series>, ConfigError>,
    {
        for scenario in scenarios {
            match &scenario.kind {
                ScenarioKind::Single(run) => run.validate()?,
                ScenarioKind::Generalized(dual) | ScenarioKind::Paired(dual) => dual.validate()?,
            }
        }

        let extinction_onset = scenarios.first().map_or(0, |s| s.run_config().n_acq);
        let mut series = Vec::new();
        for scenario in scenarios {
            tracing::debug!(label = %scenario.label, "Simulating scenario");
            series.extend(produce(scenario)?);
        }
        Ok(Self {
            extinction_onset,
            series,
        })
    }

    /// Number of trials per series (all series share it).
    pub fn trials(&self) -> usize {
        self.series.first().map_or(0, |s| s.values.len())
    }
}
