//! Deterministic stand-in pool for tests, demos, and dry runs.
//!
//! Real source pools read recorded phase-space files. [`SyntheticPool`]
//! instead fabricates records from a seeded RNG: isotropic directions, an
//! exponential energy spectrum, and log-normal weights around 1. It lets
//! the orchestrator be exercised end-to-end without any data files, and its
//! determinism (same seed, same record sequence) makes it usable in
//! assertions.

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, LogNormal, UnitSphere};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::SourceEntry;
use crate::constants::DEFAULT_SEED;
use crate::pool::{BiasFn, PoolError, SourcePool};
use crate::types::SourceParticle;

/// Spread of the log-normal weight distribution (sigma of the underlying
/// normal).
const WEIGHT_SIGMA: f64 = 0.25;

/// A seeded, self-contained [`SourcePool`] producing synthetic records.
///
/// # Example
///
/// ```
/// use phasemix::pool::SourcePool;
/// use phasemix::SyntheticPool;
///
/// let mut pool = SyntheticPool::seeded(7);
/// let w_crit = pool.critical_weight(100).unwrap();
/// let record = pool.draw(w_crit, None).unwrap();
/// assert!(record.energy > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticPool {
    rng: Xoshiro256PlusPlus,
    energy_dist: Exp<f64>,
    weight_dist: LogNormal<f64>,
    photon_fraction: f64,
    half_extent: f64,
}

impl SyntheticPool {
    /// Create a pool with the default seed.
    pub fn new() -> Self {
        Self::seeded(DEFAULT_SEED)
    }

    /// Create a pool seeded with `seed`.
    ///
    /// Defaults: mean energy 2.0, photon fraction 0.0 (pure neutron
    /// population), recording surface spanning ±1.0 in each axis.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            energy_dist: Exp::new(1.0 / 2.0).expect("default rate is positive"),
            weight_dist: LogNormal::new(0.0, WEIGHT_SIGMA)
                .expect("default sigma is positive"),
            photon_fraction: 0.0,
            half_extent: 1.0,
        }
    }

    /// Set the mean of the exponential energy spectrum.
    pub fn mean_energy(mut self, mean: f64) -> Self {
        assert!(mean.is_finite() && mean > 0.0, "mean energy must be positive");
        self.energy_dist = Exp::new(1.0 / mean).expect("rate is positive");
        self
    }

    /// Set the fraction of records tagged as photons.
    pub fn photon_fraction(mut self, fraction: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&fraction),
            "photon fraction must be in [0, 1]"
        );
        self.photon_fraction = fraction;
        self
    }

    /// Set the half-extent of the cubic recording region.
    pub fn half_extent(mut self, extent: f64) -> Self {
        assert!(
            extent.is_finite() && extent > 0.0,
            "half extent must be positive"
        );
        self.half_extent = extent;
        self
    }

    /// Turn this pool into a provider that hands out one clone per batch.
    ///
    /// Each batch starts from the same template; the orchestrator's
    /// per-batch reseed differentiates batches (or keeps them identical
    /// under a configured seed, which is the point of a dry run).
    pub fn provider(self) -> impl FnMut(&[SourceEntry]) -> Result<SyntheticPool, PoolError> {
        move |_sources| Ok(self.clone())
    }

    fn draw_record(&mut self) -> SourceParticle {
        let kind_tag = if self.rng.random::<f64>() < self.photon_fraction {
            'p'
        } else {
            'n'
        };
        let position = [
            self.rng.random_range(-self.half_extent..self.half_extent),
            self.rng.random_range(-self.half_extent..self.half_extent),
            self.rng.random_range(-self.half_extent..self.half_extent),
        ];
        let direction: [f64; 3] = UnitSphere.sample(&mut self.rng);
        SourceParticle {
            kind_tag,
            position,
            direction,
            energy: self.energy_dist.sample(&mut self.rng),
            weight: self.weight_dist.sample(&mut self.rng),
        }
    }
}

impl Default for SyntheticPool {
    fn default() -> Self {
        Self::new()
    }
}

impl SourcePool for SyntheticPool {
    /// Mean weight over `trial_draws` probe records.
    ///
    /// The probe runs on a clone of the internal RNG, so the estimate does
    /// not advance the record sequence subsequently produced by `draw`.
    fn critical_weight(&mut self, trial_draws: u64) -> Result<f64, PoolError> {
        if trial_draws == 0 {
            return Err(PoolError::EstimateFailed(
                "trial draw count is zero".to_string(),
            ));
        }
        let mut probe = self.clone();
        let mut sum = 0.0;
        for _ in 0..trial_draws {
            sum += probe.draw_record().weight;
        }
        Ok(sum / trial_draws as f64)
    }

    /// Fabricate one record; the synthetic population has no multi-source
    /// combination, so the critical weight does not alter the draw.
    fn draw(
        &mut self,
        _critical_weight: f64,
        bias: Option<&BiasFn>,
    ) -> Result<SourceParticle, PoolError> {
        let mut record = self.draw_record();
        if let Some(bias) = bias {
            record.weight *= bias(&record);
        }
        Ok(record)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    }
}
