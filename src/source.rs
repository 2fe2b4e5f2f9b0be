//! The batch-scoped sampling orchestrator.
//!
//! [`ParticleSource`] is the single entry point consumed by the transport
//! host: one call to [`next_particle`](ParticleSource::next_particle) per
//! particle history. Internally it is a two-state machine:
//!
//! - **Idle** — no pool is open. The first sampling request opens the
//!   configured sources, estimates the critical weight, sizes the batch,
//!   seeds the pool, and resets the statistics.
//! - **Active** — every request draws one record, adapts it, folds its
//!   weight into the tally, and advances the draw counter. When the counter
//!   reaches a multiple of the batch size the pool is dropped, a summary is
//!   emitted, and the machine returns to Idle.
//!
//! The draw counter is monotonic for the lifetime of the value; only the
//! per-batch statistics reset at each activation.

use std::fmt;

use crate::adapter;
use crate::batch::{self, BatchSummary};
use crate::config::{ConfigError, SourceConfig};
use crate::output;
use crate::pool::{BiasFn, PoolError, PoolProvider, SourcePool};
use crate::tally::{TallySnapshot, WeightTally};
use crate::timing::{self, SampleClock};
use crate::types::{Emission, KindResolution, SourceParticle};

/// Lifecycle of the batch-scoped pool resource.
///
/// The pool exists if and only if the batch is active.
enum BatchState<P> {
    Idle,
    Active {
        pool: P,
        critical_weight: f64,
        batch_draws: u64,
    },
}

/// Per-particle source callback for a Monte Carlo transport host.
///
/// Owns all run state explicitly (no hidden statics), so independent runs
/// — or tests — can hold independent instances.
///
/// # Example
///
/// ```
/// use phasemix::{ParticleSource, SourceConfig, SyntheticPool};
///
/// let config = SourceConfig::new()
///     .source("tracks/guide_exit.ssv", 1.0)
///     .cycles(3)
///     .cycle_size(100)
///     .seed(7);
/// let mut source = ParticleSource::new(config, SyntheticPool::seeded(7).provider())?;
///
/// let particle = source.next_particle()?;
/// assert!(particle.energy > 0.0);
/// assert_eq!(source.draws(), 1);
/// # Ok::<(), phasemix::SourceError>(())
/// ```
pub struct ParticleSource<B: PoolProvider> {
    config: SourceConfig,
    provider: B,
    bias: Option<Box<BiasFn>>,
    state: BatchState<B::Pool>,
    draws: u64,
    tally: WeightTally,
    clock: SampleClock,
    last_summary: Option<BatchSummary>,
}

impl<B: PoolProvider> ParticleSource<B> {
    /// Create a source over `provider` with the given configuration.
    ///
    /// Fails fast on malformed configuration; nothing is opened until the
    /// first sampling request.
    pub fn new(config: SourceConfig, provider: B) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            bias: None,
            state: BatchState::Idle,
            draws: 0,
            tally: WeightTally::new(),
            clock: SampleClock::new(),
            last_summary: None,
        })
    }

    /// Install a weight-correction callable, forwarded to every draw.
    pub fn with_bias<F>(mut self, bias: F) -> Self
    where
        F: Fn(&SourceParticle) -> f64 + Send + Sync + 'static,
    {
        self.bias = Some(Box::new(bias));
        self
    }

    /// Produce one particle's starting state.
    ///
    /// Ensures a pool is open, draws and adapts one record, updates the
    /// running statistics, and tears the batch down when the draw counter
    /// reaches the batch boundary. Every non-fatal call returns a complete,
    /// valid emission.
    pub fn next_particle(&mut self) -> Result<Emission, SourceError> {
        let tick = self.clock.begin();
        self.ensure_active()?;

        let record = {
            let bias = self.bias.as_deref();
            match &mut self.state {
                BatchState::Active {
                    pool,
                    critical_weight,
                    ..
                } => pool.draw(*critical_weight, bias)?,
                BatchState::Idle => unreachable!("ensure_active leaves the batch active"),
            }
        };

        let emission = adapter::adapt_record(&record);
        if let KindResolution::Defaulted { original } = emission.resolution {
            eprintln!(
                "[phasemix] WARNING: unrecognized particle type '{}'; emitting as neutron",
                original
            );
        }

        self.tally.observe(emission.weight);
        self.draws += 1;
        self.clock.record(tick);
        self.finish_if_boundary();

        Ok(emission)
    }

    /// Total draws produced over the lifetime of this value.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Aggregates of the current batch's statistics.
    pub fn tally(&self) -> TallySnapshot {
        self.tally.snapshot()
    }

    /// Cumulative wall-clock seconds spent inside sampling calls.
    pub fn sample_time_secs(&self) -> f64 {
        self.clock.cumulative_secs()
    }

    /// Whether a pool is currently open.
    pub fn is_active(&self) -> bool {
        matches!(self.state, BatchState::Active { .. })
    }

    /// The batch size in draws, while a batch is active.
    pub fn batch_draws(&self) -> Option<u64> {
        match &self.state {
            BatchState::Active { batch_draws, .. } => Some(*batch_draws),
            BatchState::Idle => None,
        }
    }

    /// The critical weight estimated at the current batch's activation.
    pub fn critical_weight(&self) -> Option<f64> {
        match &self.state {
            BatchState::Active {
                critical_weight, ..
            } => Some(*critical_weight),
            BatchState::Idle => None,
        }
    }

    /// The summary emitted at the most recent batch teardown.
    pub fn last_summary(&self) -> Option<&BatchSummary> {
        self.last_summary.as_ref()
    }

    /// The configuration this source was built with.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Idle → Active transition: open, estimate, size, seed, reset.
    fn ensure_active(&mut self) -> Result<(), SourceError> {
        if matches!(self.state, BatchState::Active { .. }) {
            return Ok(());
        }
        eprintln!("{}", output::format_batch_start(self.config.sources.len()));

        let mut pool = self.provider.open(&self.config.sources)?;
        let critical_weight = pool.critical_weight(self.config.trial_draws)?;
        let batch_draws = batch::planned_draws(self.config.cycles, self.config.cycle_size)?;
        pool.reseed(self.config.seed.unwrap_or_else(timing::time_seed));
        self.tally.reset();

        self.state = BatchState::Active {
            pool,
            critical_weight,
            batch_draws,
        };
        Ok(())
    }

    /// Active → Idle transition, taken exactly at multiples of the batch
    /// size. Off the boundary this is a no-op.
    fn finish_if_boundary(&mut self) {
        let batch_draws = match &self.state {
            BatchState::Active { batch_draws, .. } => *batch_draws,
            BatchState::Idle => return,
        };
        if self.draws == 0 || self.draws % batch_draws != 0 {
            return;
        }

        let snapshot = self.tally.snapshot();
        let summary = BatchSummary {
            draws: self.draws,
            weight_sum: snapshot.weight_sum,
            error: snapshot.error,
            sample_time_secs: self.clock.cumulative_secs(),
        };
        eprintln!("{}", output::format_batch_summary(&summary));
        self.last_summary = Some(summary);

        // Dropping the pool releases the resource.
        self.state = BatchState::Idle;
    }
}

impl<B: PoolProvider> fmt::Debug for ParticleSource<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleSource")
            .field("draws", &self.draws)
            .field("active", &self.is_active())
            .field("biased", &self.bias.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Error returned from [`ParticleSource::next_particle`].
///
/// Both variants are fatal to the run; recoverable conditions (unrecognized
/// type tags, timing failures) never surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The run parameters were malformed.
    Config(ConfigError),
    /// The pool collaborator failed.
    Pool(PoolError),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(err) => write!(f, "configuration error: {}", err),
            SourceError::Pool(err) => write!(f, "source pool error: {}", err),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Config(err) => Some(err),
            SourceError::Pool(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SourceError {
    fn from(err: ConfigError) -> Self {
        SourceError::Config(err)
    }
}

impl From<PoolError> for SourceError {
    fn from(err: PoolError) -> Self {
        SourceError::Pool(err)
    }
}
