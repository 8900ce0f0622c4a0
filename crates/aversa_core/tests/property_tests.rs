//! Property-based tests for aversa_core.
//!
//! Uses proptest to check invariants that must hold for every valid
//! configuration, not just the presets.

use aversa_core::recurrence::{select_rate, update};
use aversa_core::{
    mean_run, run_dual, run_single, DualRunConfig, Ensemble, RunConfig, SampledOutcomes,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_probability() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0f64..=1.0]
}

fn arb_run_config() -> impl Strategy<Value = RunConfig> {
    (
        0usize..40,
        0usize..40,
        0.0f64..=1.0,
        0.0f64..=1.0,
        arb_probability(),
        arb_probability(),
    )
        .prop_map(
            |(n_acq, n_ext, alpha_pos, alpha_neg, p_us_acq, p_us_ext)| RunConfig {
                n_acq,
                n_ext,
                alpha_pos,
                alpha_neg,
                p_us_acq,
                p_us_ext,
            },
        )
}

fn arb_dual_config() -> impl Strategy<Value = DualRunConfig> {
    (arb_run_config(), 0.0f64..=1.0).prop_map(|(run, g)| DualRunConfig::new(run, g))
}

// ============================================================================
// Trial Recurrence
// ============================================================================

proptest! {
    /// Same inputs, same output: no hidden state.
    #[test]
    fn update_is_deterministic(
        v in -2.0f64..2.0,
        r in prop_oneof![Just(0.0), Just(1.0)],
        a_pos in 0.0f64..=1.0,
        a_neg in 0.0f64..=1.0,
    ) {
        prop_assert_eq!(update(v, r, a_pos, a_neg), update(v, r, a_pos, a_neg));
    }

    /// Equal rates collapse to plain Rescorla-Wagner whatever the error sign.
    #[test]
    fn symmetric_rates_are_standard_rw(
        v in -2.0f64..2.0,
        r in prop_oneof![Just(0.0), Just(1.0)],
        a in 0.0f64..=1.0,
    ) {
        prop_assert_eq!(update(v, r, a, a), v + a * (r - v));
    }

    /// The selected rate follows the sign of the error, ties going negative.
    #[test]
    fn rate_follows_error_sign(delta in -1.0f64..1.0, a_pos in 0.0f64..1.0, a_neg in 0.0f64..1.0) {
        let expected = if delta > 0.0 { a_pos } else { a_neg };
        prop_assert_eq!(select_rate(delta, a_pos, a_neg), expected);
    }

    /// With rates in [0, 1] and V in [0, 1], V never leaves [0, 1].
    #[test]
    fn unit_rates_keep_value_in_unit_interval(
        v in 0.0f64..=1.0,
        r in prop_oneof![Just(0.0), Just(1.0)],
        a_pos in 0.0f64..=1.0,
        a_neg in 0.0f64..=1.0,
    ) {
        let next = update(v, r, a_pos, a_neg);
        prop_assert!((0.0..=1.0).contains(&next), "left unit interval: {}", next);
    }
}

// ============================================================================
// Simulators
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn single_run_length_is_total_trials(cfg in arb_run_config(), seed in any::<u64>()) {
        let t = run_single(&cfg, &mut SampledOutcomes::seeded(seed)).unwrap();
        prop_assert_eq!(t.len(), cfg.n_acq + cfg.n_ext);
    }

    #[test]
    fn dual_run_lengths_match(cfg in arb_dual_config(), seed in any::<u64>()) {
        let pair = run_dual(&cfg, &mut SampledOutcomes::seeded(seed)).unwrap();
        prop_assert_eq!(pair.cs.len(), cfg.run.total_trials());
        prop_assert_eq!(pair.gs.len(), cfg.run.total_trials());
    }

    /// The CS half of a coupled run is exactly a single-stimulus run on the
    /// same stream: coupling never feeds back into CS.
    #[test]
    fn dual_cs_equals_single_run(cfg in arb_dual_config(), seed in any::<u64>()) {
        let single = run_single(&cfg.run, &mut SampledOutcomes::seeded(seed)).unwrap();
        let pair = run_dual(&cfg, &mut SampledOutcomes::seeded(seed)).unwrap();
        prop_assert_eq!(pair.cs, single);
    }

    #[test]
    fn zero_generalization_pins_gs(run in arb_run_config(), seed in any::<u64>()) {
        let pair = run_dual(&DualRunConfig::new(run, 0.0), &mut SampledOutcomes::seeded(seed)).unwrap();
        prop_assert!(pair.gs.iter().all(|&v| v == 0.0));
    }

    /// g = 1 with symmetric rates: GS follows plain RW at rate a on its own error.
    #[test]
    fn full_generalization_mirrors_cs_rule(
        run in arb_run_config(),
        a in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let run = run.with_rates(a, a);
        let single = run_single(&run, &mut SampledOutcomes::seeded(seed)).unwrap();
        let pair = run_dual(&DualRunConfig::new(run, 1.0), &mut SampledOutcomes::seeded(seed)).unwrap();
        // Both start at 0 and see the same outcomes at the same rate.
        prop_assert_eq!(pair.gs, single);
    }

    #[test]
    fn single_run_ensemble_equals_direct_run(cfg in arb_run_config(), master in any::<u64>()) {
        let ensemble = Ensemble::new(1, master).unwrap();
        let seed = ensemble.run_seeds()[0];
        let direct = run_single(&cfg, &mut SampledOutcomes::seeded(seed)).unwrap();
        prop_assert_eq!(ensemble.mean(&cfg).unwrap(), direct);
    }

    #[test]
    fn ensemble_mean_has_run_length(cfg in arb_run_config(), n in 1usize..8, master in any::<u64>()) {
        let mean = mean_run(n, &cfg, master).unwrap();
        prop_assert_eq!(mean.len(), cfg.total_trials());
    }

    #[test]
    fn out_of_range_probability_rejected(p in prop_oneof![1.0001f64..10.0, -10.0f64..-0.0001]) {
        let cfg = RunConfig { p_us_ext: p, ..Default::default() };
        prop_assert!(run_single(&cfg, &mut SampledOutcomes::seeded(0)).is_err());
    }
}
