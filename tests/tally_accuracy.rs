//! Tests for the weighted-sum estimator: exact folding, the error proxy,
//! and serialization of the report types.

use phasemix::{BatchSummary, TallySnapshot, WeightTally};
use proptest::prelude::*;

// =============================================================================
// EXACT FOLDING
// =============================================================================

#[test]
fn sums_match_a_left_to_right_fold() {
    let weights: Vec<f64> = (0..10_000).map(|i| ((i * 37) % 101) as f64 / 101.0).collect();

    let mut tally = WeightTally::new();
    let mut fold = 0.0;
    for &w in &weights {
        tally.observe(w);
        fold += w;
    }

    let snapshot = tally.snapshot();
    assert_eq!(snapshot.count, weights.len() as u64);
    assert!(((snapshot.weight_sum - fold) / fold).abs() < 1e-9);
}

#[test]
fn error_proxy_is_the_root_of_the_squared_sum() {
    let mut tally = WeightTally::new();
    let mut sq = 0.0;
    for i in 1..=100 {
        let w = i as f64 * 0.01;
        tally.observe(w);
        sq += w * w;
    }
    assert!((tally.snapshot().error - sq.sqrt()).abs() < 1e-12);
}

proptest! {
    #[test]
    fn fold_property_holds_for_arbitrary_weights(
        weights in proptest::collection::vec(1e-6f64..1e3, 1..500)
    ) {
        let mut tally = WeightTally::new();
        let mut fold = 0.0;
        for &w in &weights {
            tally.observe(w);
            fold += w;
        }
        let snapshot = tally.snapshot();
        prop_assert_eq!(snapshot.count, weights.len() as u64);
        prop_assert!(((snapshot.weight_sum - fold) / fold).abs() < 1e-9);
    }

    #[test]
    fn count_always_matches_observations(n in 0u64..2000) {
        let mut tally = WeightTally::new();
        for _ in 0..n {
            tally.observe(1.0);
        }
        prop_assert_eq!(tally.count(), n);
    }
}

// =============================================================================
// SERIALIZATION ROUND-TRIPS
// =============================================================================

#[test]
fn snapshot_round_trips_through_json() {
    let snapshot = TallySnapshot {
        count: 1700,
        weight_sum: 1652.5,
        error: 41.25,
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: TallySnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn summary_round_trips_through_json() {
    let summary = BatchSummary {
        draws: 3400,
        weight_sum: 1650.0,
        error: 40.9,
        sample_time_secs: 0.75,
    };
    let json = serde_json::to_string(&summary).unwrap();
    let back: BatchSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);
}
