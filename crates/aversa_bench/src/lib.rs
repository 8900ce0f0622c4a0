//! aversa_bench — trajectory-level behaviour of the threat-learning engine.
//!
//! Validates what the ensemble means look like over whole experiments:
//! - Acquisition drives threat up, extinction drives it back down
//! - Impaired safety learning (small α₋) leaves threat behind
//! - Generalization strength orders the GS curves
//! - Ensemble means agree with the deterministic oracle

use aversa_core::{ConfigError, DualRunConfig, DualTrajectory, Ensemble, RunConfig, Trajectory};

/// Mean CS trajectory over `n_runs` runs with a fixed master seed.
pub fn mean_single(config: &RunConfig, n_runs: usize, seed: u64) -> Result<Trajectory, ConfigError> {
    Ensemble::new(n_runs, seed)?.mean(config)
}

pub fn mean_dual(
    config: &DualRunConfig,
    n_runs: usize,
    seed: u64,
) -> Result<DualTrajectory, ConfigError> {
    Ensemble::new(n_runs, seed)?.mean(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aversa_core::oracle::{expected_dual_run, expected_run};
    use aversa_core::scenario::{generalization_sweep, learning_rate_comparison, Report};
    use aversa_core::SweepConfig;

    /// Full reinforcement then none: the mean rises for 30 trials, then falls.
    #[test]
    fn test_acquisition_then_extinction() {
        let cfg = RunConfig {
            alpha_pos: 0.2,
            alpha_neg: 0.2,
            ..Default::default()
        };
        let mean = mean_single(&cfg, 300, 1).unwrap();

        for w in mean[..30].windows(2) {
            assert!(w[1] > w[0], "acquisition should rise: {} -> {}", w[0], w[1]);
        }
        assert!(mean[29] > 0.99, "should approach 1, got {}", mean[29]);

        for w in mean[30..].windows(2) {
            assert!(w[1] < w[0], "extinction should fall: {} -> {}", w[0], w[1]);
        }
        assert!(mean[69] < 0.01, "should approach 0, got {}", mean[69]);
    }

    /// Easy to acquire, hard to unlearn: α₋ = 0.02 keeps most of the threat
    /// after 40 extinction trials, α₋ = 0.2 does not.
    #[test]
    fn test_impaired_safety_learning() {
        let base = RunConfig::default();
        let scenarios = learning_rate_comparison(&base, &SweepConfig::default());
        let normal = mean_single(scenarios[0].run_config(), 300, 2).unwrap();
        let impaired = mean_single(scenarios[1].run_config(), 300, 2).unwrap();

        // Acquisition is identical in expectation (same α₊)
        assert!((normal[29] - impaired[29]).abs() < 1e-9);

        assert!(
            impaired[69] > normal[69],
            "impaired should retain more threat: {} vs {}",
            impaired[69],
            normal[69]
        );
        assert!(impaired[69] > 0.4, "impaired retention too low: {}", impaired[69]);
        assert!(normal[69] < 0.01, "normal extinction incomplete: {}", normal[69]);

        let summary = impaired.summary(base.n_acq);
        let retention = summary.retention.expect("both phases present");
        assert!((retention - 0.98f64.powi(40)).abs() < 1e-6);
    }

    /// Partial reinforcement: stochastic means track the oracle trial by trial.
    #[test]
    fn test_partial_reinforcement_matches_oracle() {
        let cfg = RunConfig {
            alpha_pos: 0.15,
            alpha_neg: 0.15,
            p_us_acq: 0.75,
            p_us_ext: 0.25,
            ..Default::default()
        };
        let mean = mean_single(&cfg, 3000, 3).unwrap();
        let oracle = expected_run(&cfg).unwrap();
        for (i, (m, e)) in mean.iter().zip(oracle.iter()).enumerate() {
            assert!((m - e).abs() < 0.02, "trial {}: {} vs {}", i, m, e);
        }
    }

    /// GS under symmetric rates is linear too, so its mean also tracks the oracle.
    #[test]
    fn test_generalized_stimulus_matches_oracle() {
        let run = RunConfig {
            alpha_pos: 0.2,
            alpha_neg: 0.2,
            p_us_acq: 0.8,
            p_us_ext: 0.1,
            ..Default::default()
        };
        let cfg = DualRunConfig::new(run, 0.5);
        let mean = mean_dual(&cfg, 3000, 4).unwrap();
        let oracle = expected_dual_run(&cfg).unwrap();
        for (i, (m, e)) in mean.gs.iter().zip(oracle.gs.iter()).enumerate() {
            assert!((m - e).abs() < 0.02, "GS trial {}: {} vs {}", i, m, e);
        }
    }

    /// Stronger generalization: GS climbs higher during acquisition. Under
    /// impaired safety learning every generalized curve still holds more than
    /// half its threat after extinction.
    #[test]
    fn test_generalization_sweep_ordering() {
        let base = RunConfig::default();
        let scenarios = generalization_sweep(&base, &[0.0, 0.2, 0.5, 0.8]);
        let ensemble = Ensemble::new(300, 5).unwrap();
        let report = Report::simulate(&scenarios, &ensemble).unwrap();

        assert_eq!(report.extinction_onset, 30);
        assert!(report.series[0].values.iter().all(|&v| v == 0.0));

        for pair in report.series.windows(2) {
            let (lo, hi) = (&pair[0].values, &pair[1].values);
            assert!(
                hi[29] > lo[29],
                "{} should exceed {} at extinction onset",
                pair[1].label,
                pair[0].label
            );
        }
        for series in &report.series[1..] {
            assert!(
                series.values[69] > 0.5,
                "{} extinguished too far: {}",
                series.label,
                series.values[69]
            );
        }
    }

    /// CS always leads GS in acquisition when g < 1.
    #[test]
    fn test_cs_leads_gs() {
        let cfg = DualRunConfig::new(RunConfig::default(), 0.5);
        let mean = mean_dual(&cfg, 200, 6).unwrap();
        for i in 0..30 {
            assert!(mean.cs[i] > mean.gs[i], "trial {}: CS {} GS {}", i, mean.cs[i], mean.gs[i]);
        }
    }
}
