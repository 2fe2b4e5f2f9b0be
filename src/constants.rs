//! Named constants used throughout the crate.

/// Distance by which an emitted particle is pushed along its direction of
/// flight, in the host's length units.
///
/// Recorded particles sit exactly on the recording surface; emitting them
/// there leaves the transport geometry with a zero-distance boundary
/// crossing. The nudge moves the starting point just off the surface.
pub const SURFACE_NUDGE: f64 = 1e-4;

/// Draws covering the host's inactive warm-up cycles at the start of a run.
///
/// These draws are produced like any other but the host discards their
/// contribution, so they must be budgeted into the batch size.
pub const SETTLING_DRAWS: u64 = 500;

/// Fixed allowance added on top of [`SETTLING_DRAWS`] when sizing a batch.
///
/// Kept separate from the settling draws: the two have distinct intent
/// (warm-up coverage vs headroom for hosts that overdraw slightly) even
/// though both enter the batch size the same way.
pub const SETTLING_MARGIN: u64 = 1000;

/// Default number of trial draws used to estimate the critical weight at
/// batch activation.
pub const CRITICAL_WEIGHT_TRIALS: u64 = 1000;

/// Fallback RNG seed used when no seed is configured and the system clock
/// cannot provide one.
///
/// The value `0x70686173656D6978` is "phasemix" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x70686173656D6978;
