//! Per-call sampling-time measurement.
//!
//! Every sampling call is wrapped in an elapsed-time measurement and the
//! result accumulated, so the cumulative cost of source sampling can be
//! reported alongside the batch statistics at teardown. Timing is
//! diagnostics only: a failed measurement contributes zero and never
//! interrupts sampling.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::constants::DEFAULT_SEED;

/// Accumulator for wall-clock time spent inside sampling calls.
#[derive(Debug, Clone, Default)]
pub struct SampleClock {
    cumulative_secs: f64,
}

/// Start-of-call marker handed back to [`SampleClock::record`].
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    started: Instant,
}

impl SampleClock {
    /// Create a clock with zero accumulated time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a sampling call.
    pub fn begin(&self) -> Tick {
        Tick {
            started: Instant::now(),
        }
    }

    /// Fold the elapsed time since `tick` into the cumulative total.
    ///
    /// Returns the seconds added. A measurement the monotonic clock cannot
    /// account for (or a non-finite conversion) degrades to zero rather
    /// than failing the call.
    pub fn record(&mut self, tick: Tick) -> f64 {
        let elapsed = Instant::now()
            .checked_duration_since(tick.started)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        self.cumulative_secs += elapsed;
        elapsed
    }

    /// Total wall-clock seconds recorded so far.
    pub fn cumulative_secs(&self) -> f64 {
        self.cumulative_secs
    }
}

/// Derive a seed from the system clock, for batches without a configured
/// seed.
///
/// Falls back to [`DEFAULT_SEED`] if the clock predates the epoch; seeding
/// is diagnostics-adjacent plumbing and must never abort sampling.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(DEFAULT_SEED)
}
