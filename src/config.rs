//! Configuration for a sampling run.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::CRITICAL_WEIGHT_TRIALS;

/// One recorded particle population and its relative weight in the mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Path to the recorded particle list.
    pub path: PathBuf,
    /// Relative weight of this population when sources are combined.
    pub weight: f64,
}

/// Configuration options for a [`ParticleSource`](crate::ParticleSource).
///
/// Immutable for the lifetime of one batch; the simulation parameters
/// (`cycles`, `cycle_size`) come from the host's run setup and size the
/// batch so that one resource acquisition covers one full run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Recorded populations to combine, in order, with relative weights.
    pub sources: Vec<SourceEntry>,

    /// Number of simulation cycles in the host run.
    ///
    /// Default: 1.
    pub cycles: u64,

    /// Particles per simulation cycle.
    ///
    /// Default: 1.
    pub cycle_size: u64,

    /// Trial draws used to estimate the critical weight at batch
    /// activation.
    ///
    /// Default: [`CRITICAL_WEIGHT_TRIALS`].
    pub trial_draws: u64,

    /// Optional deterministic seed for the pool's randomness.
    ///
    /// When set, every batch reseeds the pool with this value, making runs
    /// reproducible. Default: None (a time-derived seed is used).
    pub seed: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            cycles: 1,
            cycle_size: 1,
            trial_draws: CRITICAL_WEIGHT_TRIALS,
            seed: None,
        }
    }
}

impl SourceConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Add a recorded population with the given relative weight.
    pub fn source(mut self, path: impl Into<PathBuf>, weight: f64) -> Self {
        assert!(
            weight.is_finite() && weight > 0.0,
            "source weight must be finite and positive"
        );
        self.sources.push(SourceEntry {
            path: path.into(),
            weight,
        });
        self
    }

    /// Set the number of simulation cycles.
    pub fn cycles(mut self, cycles: u64) -> Self {
        assert!(cycles > 0, "cycles must be positive");
        self.cycles = cycles;
        self
    }

    /// Set the number of particles per cycle.
    pub fn cycle_size(mut self, size: u64) -> Self {
        assert!(size > 0, "cycle_size must be positive");
        self.cycle_size = size;
        self
    }

    /// Set the number of trial draws for critical-weight estimation.
    pub fn trial_draws(mut self, draws: u64) -> Self {
        assert!(draws > 0, "trial_draws must be positive");
        self.trial_draws = draws;
        self
    }

    /// Set a deterministic seed for the pool's randomness.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check that the configuration describes a runnable batch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }
        for entry in &self.sources {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(ConfigError::InvalidSourceWeight {
                    path: entry.path.clone(),
                    weight: entry.weight,
                });
            }
        }
        if self.cycles == 0 || self.cycle_size == 0 {
            return Err(ConfigError::InvalidRunLength {
                cycles: self.cycles,
                cycle_size: self.cycle_size,
            });
        }
        if self.trial_draws == 0 {
            return Err(ConfigError::InvalidTrialDraws);
        }
        // The batch size must be derivable as well.
        crate::batch::planned_draws(self.cycles, self.cycle_size)?;
        Ok(())
    }
}

/// Fatal configuration error.
///
/// There is no safe partial state to resume from after any of these, so
/// they surface as `Err` and the host is expected to terminate the run.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No recorded populations were configured.
    NoSources,
    /// A source entry carried a non-finite or non-positive relative weight.
    InvalidSourceWeight {
        /// Path of the offending entry.
        path: PathBuf,
        /// The rejected weight.
        weight: f64,
    },
    /// The simulation parameters describe an empty run.
    InvalidRunLength {
        /// Configured cycle count.
        cycles: u64,
        /// Configured particles per cycle.
        cycle_size: u64,
    },
    /// The critical-weight trial draw count was zero.
    InvalidTrialDraws,
    /// The derived batch size was non-positive or overflowed.
    InvalidBatchSize {
        /// Configured cycle count.
        cycles: u64,
        /// Configured particles per cycle.
        cycle_size: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoSources => {
                write!(f, "no source files configured")
            }
            ConfigError::InvalidSourceWeight { path, weight } => {
                write!(
                    f,
                    "source '{}' has invalid relative weight {}",
                    path.display(),
                    weight
                )
            }
            ConfigError::InvalidRunLength { cycles, cycle_size } => {
                write!(
                    f,
                    "run parameters describe an empty run \
                     (cycles = {}, cycle_size = {})",
                    cycles, cycle_size
                )
            }
            ConfigError::InvalidTrialDraws => {
                write!(f, "critical-weight trial draw count is zero")
            }
            ConfigError::InvalidBatchSize { cycles, cycle_size } => {
                write!(
                    f,
                    "batch size is not derivable from cycles = {} and \
                     cycle_size = {}",
                    cycles, cycle_size
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
