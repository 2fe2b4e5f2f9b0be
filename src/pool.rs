//! The injected source-pool capability.
//!
//! The multi-source combination and biased-sampling algorithm lives outside
//! this crate. The orchestrator consumes it through the narrow interface
//! defined here:
//!
//! - [`PoolProvider::open`] — open a weighted set of recorded populations
//! - [`SourcePool::critical_weight`] — estimate the splitting threshold
//! - [`SourcePool::draw`] — produce one biased particle record
//! - close — dropping the pool value
//!
//! Keeping the pool behind a trait lets tests drive the orchestrator with
//! fakes instead of real phase-space data files.

use std::fmt;

use crate::config::SourceEntry;
use crate::types::SourceParticle;

/// Weight-correction callable applied by the pool during sampling.
///
/// The returned factor is already reflected in the weight of the record the
/// pool hands back.
pub type BiasFn = dyn Fn(&SourceParticle) -> f64 + Send + Sync;

/// An opened, ready-to-sample set of recorded particle populations.
///
/// A pool value is owned by exactly one batch; releasing the resource is
/// dropping the value.
pub trait SourcePool {
    /// Estimate the critical statistical weight over `trial_draws` draws.
    ///
    /// This is a read over the opened populations: it must not affect the
    /// record sequence subsequently produced by [`draw`](Self::draw).
    fn critical_weight(&mut self, trial_draws: u64) -> Result<f64, PoolError>;

    /// Produce exactly one particle record.
    ///
    /// `critical_weight` steers the pool's splitting/combination behavior;
    /// `bias`, when present, is applied internally and already reflected in
    /// the returned weight.
    fn draw(
        &mut self,
        critical_weight: f64,
        bias: Option<&BiasFn>,
    ) -> Result<SourceParticle, PoolError>;

    /// Install a new seed for the pool's internal randomness.
    ///
    /// Pools without internal randomness can ignore this; the default
    /// implementation does.
    fn reseed(&mut self, _seed: u64) {}
}

/// Capability to open a [`SourcePool`] from a weighted source list.
///
/// Implemented for closures, so a test can inject a fake inline:
///
/// ```
/// use phasemix::pool::{PoolError, PoolProvider, SourcePool};
/// use phasemix::SourceParticle;
///
/// struct Fixed;
/// impl SourcePool for Fixed {
///     fn critical_weight(&mut self, _: u64) -> Result<f64, PoolError> {
///         Ok(1.0)
///     }
///     fn draw(
///         &mut self,
///         _: f64,
///         _: Option<&phasemix::pool::BiasFn>,
///     ) -> Result<SourceParticle, PoolError> {
///         Ok(SourceParticle {
///             kind_tag: 'n',
///             position: [0.0; 3],
///             direction: [0.0, 0.0, 1.0],
///             energy: 2.0,
///             weight: 1.0,
///         })
///     }
/// }
///
/// let mut provider = |_: &[phasemix::SourceEntry]| -> Result<Fixed, PoolError> { Ok(Fixed) };
/// let _pool = provider.open(&[]).unwrap();
/// ```
pub trait PoolProvider {
    /// The pool type this provider opens.
    type Pool: SourcePool;

    /// Open the given weighted source list.
    ///
    /// Fails if any path is unreadable or malformed.
    fn open(&mut self, sources: &[SourceEntry]) -> Result<Self::Pool, PoolError>;
}

impl<F, P> PoolProvider for F
where
    F: FnMut(&[SourceEntry]) -> Result<P, PoolError>,
    P: SourcePool,
{
    type Pool = P;

    fn open(&mut self, sources: &[SourceEntry]) -> Result<P, PoolError> {
        self(sources)
    }
}

/// Failure reported by the pool collaborator.
///
/// All pool failures are fatal to the run: a batch cannot be resumed from a
/// half-opened or half-sampled pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A source path was unreadable or its contents malformed.
    OpenFailed(String),
    /// Critical-weight estimation failed.
    EstimateFailed(String),
    /// The pool could not produce a record.
    DrawFailed(String),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::OpenFailed(msg) => write!(f, "failed to open sources: {}", msg),
            PoolError::EstimateFailed(msg) => {
                write!(f, "critical-weight estimation failed: {}", msg)
            }
            PoolError::DrawFailed(msg) => write!(f, "failed to draw a particle: {}", msg),
        }
    }
}

impl std::error::Error for PoolError {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl SourcePool for Constant {
        fn critical_weight(&mut self, _trial_draws: u64) -> Result<f64, PoolError> {
            Ok(self.0)
        }

        fn draw(
            &mut self,
            _critical_weight: f64,
            bias: Option<&BiasFn>,
        ) -> Result<SourceParticle, PoolError> {
            let mut record = SourceParticle {
                kind_tag: 'n',
                position: [0.0; 3],
                direction: [0.0, 0.0, 1.0],
                energy: 1.0,
                weight: self.0,
            };
            if let Some(bias) = bias {
                record.weight *= bias(&record);
            }
            Ok(record)
        }
    }

    #[test]
    fn closures_are_providers() {
        let mut provider =
            |_: &[SourceEntry]| -> Result<Constant, PoolError> { Ok(Constant(2.5)) };
        let mut pool = provider.open(&[]).unwrap();
        assert_eq!(pool.critical_weight(10), Ok(2.5));
    }

    #[test]
    fn bias_reaches_the_pool() {
        let mut pool = Constant(2.0);
        let bias = |p: &SourceParticle| p.energy * 3.0;
        let record = pool.draw(1.0, Some(&bias)).unwrap();
        assert_eq!(record.weight, 6.0);
    }

    #[test]
    fn default_reseed_is_a_no_op() {
        let mut pool = Constant(1.0);
        pool.reseed(42);
        assert_eq!(pool.critical_weight(1), Ok(1.0));
    }

    #[test]
    fn error_display() {
        let err = PoolError::OpenFailed("missing file".into());
        assert!(err.to_string().contains("missing file"));
    }
}
