//! Online weighted-sum statistics.
//!
//! Accumulates the count, weight sum, and squared-weight sum of every
//! emitted particle with O(1) state, so the integral estimate and its error
//! proxy are available at any point in a batch.

use serde::{Deserialize, Serialize};

/// Running weighted-sum accumulator for one batch.
///
/// # Example
///
/// ```
/// use phasemix::WeightTally;
///
/// let mut tally = WeightTally::new();
/// for w in [0.5, 1.0, 1.5] {
///     tally.observe(w);
/// }
/// let snapshot = tally.snapshot();
/// assert_eq!(snapshot.count, 3);
/// assert!((snapshot.weight_sum - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightTally {
    count: u64,
    weight_sum: f64,
    weight_sq_sum: f64,
}

impl WeightTally {
    /// Create an empty tally; all aggregates are exactly zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one particle weight into the running sums.
    pub fn observe(&mut self, weight: f64) {
        self.count += 1;
        self.weight_sum += weight;
        self.weight_sq_sum += weight * weight;
    }

    /// The current aggregates.
    ///
    /// The error field is the square root of the squared-weight sum — the
    /// unnormalized proxy conventionally reported alongside the integral,
    /// not divided by the count.
    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            count: self.count,
            weight_sum: self.weight_sum,
            error: self.weight_sq_sum.sqrt(),
        }
    }

    /// Reset all aggregates to zero for a fresh batch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of weights observed since the last reset.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of observed weights since the last reset.
    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }
}

/// Aggregates of a [`WeightTally`] at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TallySnapshot {
    /// Number of weights observed.
    pub count: u64,
    /// Sum of observed weights (the integral estimate).
    pub weight_sum: f64,
    /// Square root of the squared-weight sum (unnormalized error proxy).
    pub error: f64,
}
