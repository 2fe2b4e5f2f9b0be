//! # phasemix
//!
//! Batch-scoped resampling of recorded phase-space particle populations as
//! a source term for Monte Carlo transport hosts.
//!
//! A transport host calls [`ParticleSource::next_particle`] once per
//! particle history. Each call produces one starting state (species,
//! position, direction, energy, statistical weight) drawn from a weighted
//! combination of previously recorded populations, while the crate
//! maintains:
//!
//! - a batch-scoped pool resource, opened lazily on the first call and
//!   released after a computed number of draws sized to one full run
//! - running weighted-sum statistics, so each batch reports its integral
//!   estimate and error proxy at teardown
//! - cumulative sampling-time diagnostics
//!
//! The multi-source combination algorithm itself is an injected capability
//! (see [`pool`]); this crate orchestrates its lifecycle and normalizes its
//! records for the host.
//!
//! ## Quick Start
//!
//! ```
//! use phasemix::{ParticleSource, SourceConfig, SyntheticPool};
//!
//! let config = SourceConfig::new()
//!     .source("tracks/guide_exit.ssv", 1.0)
//!     .cycles(3)
//!     .cycle_size(100)
//!     .seed(7);
//!
//! // SyntheticPool stands in for a real phase-space-backed pool.
//! let mut source = ParticleSource::new(config, SyntheticPool::seeded(7).provider())?;
//!
//! let particle = source.next_particle()?;
//! assert!(particle.weight > 0.0);
//! println!(
//!     "type {} at {:?} with E = {}",
//!     particle.host_code(),
//!     particle.position,
//!     particle.energy
//! );
//! # Ok::<(), phasemix::SourceError>(())
//! ```
//!
//! ## Common Pitfall: Reusing a Source Across Runs
//!
//! One `ParticleSource` is sized for one run: the batch boundary is derived
//! from the configured cycle count and cycle size. Feeding it calls from a
//! differently-sized run desynchronizes teardown from the host's particle
//! budget. Build a fresh source (or a fresh configuration) per run.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod batch;
mod config;
mod constants;
mod source;
mod tally;
mod types;

// Functional modules
pub mod adapter;
pub mod output;
pub mod pool;
pub mod synthetic;
pub mod timing;

// Re-exports for public API
pub use batch::{planned_draws, BatchSummary};
pub use config::{ConfigError, SourceConfig, SourceEntry};
pub use constants::{
    CRITICAL_WEIGHT_TRIALS, DEFAULT_SEED, SETTLING_DRAWS, SETTLING_MARGIN, SURFACE_NUDGE,
};
pub use source::{ParticleSource, SourceError};
pub use synthetic::SyntheticPool;
pub use tally::{TallySnapshot, WeightTally};
pub use types::{Emission, KindResolution, ParticleKind, SourceParticle};
