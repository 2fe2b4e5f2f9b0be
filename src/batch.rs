//! Batch sizing and the end-of-batch summary.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::constants::{SETTLING_DRAWS, SETTLING_MARGIN};

/// Number of draws one batch must cover for a run with the given
/// simulation parameters.
///
/// The host draws `(cycles - 1) * cycle_size` particles for its active
/// cycles, plus [`SETTLING_DRAWS`] for warm-up coverage and
/// [`SETTLING_MARGIN`] of headroom. The two allowances are deliberately
/// kept as separate constants.
///
/// A non-positive or non-derivable batch size is a fatal configuration
/// error; the orchestrator must never reach its modulo check with one.
pub fn planned_draws(cycles: u64, cycle_size: u64) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidBatchSize { cycles, cycle_size };
    if cycles == 0 || cycle_size == 0 {
        return Err(invalid());
    }
    let draws = (cycles - 1)
        .checked_mul(cycle_size)
        .and_then(|active| active.checked_add(SETTLING_DRAWS + SETTLING_MARGIN))
        .ok_or_else(invalid)?;
    if draws == 0 {
        return Err(invalid());
    }
    Ok(draws)
}

/// Statistics reported when a batch tears down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Total draws produced over the process lifetime at teardown.
    pub draws: u64,
    /// Sum of emitted weights in the batch (the integral estimate).
    pub weight_sum: f64,
    /// Square root of the batch's squared-weight sum (unnormalized error
    /// proxy).
    pub error: f64,
    /// Cumulative wall-clock seconds spent inside sampling calls.
    pub sample_time_secs: f64,
}
