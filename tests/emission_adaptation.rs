//! Tests for record adaptation as seen through the public API: type
//! decoding with fallback, the surface nudge, and bias forwarding.

use phasemix::pool::{BiasFn, PoolError, SourcePool};
use phasemix::{
    KindResolution, ParticleKind, ParticleSource, SourceConfig, SourceEntry, SourceParticle,
    SURFACE_NUDGE,
};

// =============================================================================
// FIXED-RECORD POOL
// =============================================================================

struct FixedPool {
    record: SourceParticle,
}

impl SourcePool for FixedPool {
    fn critical_weight(&mut self, _trial_draws: u64) -> Result<f64, PoolError> {
        Ok(1.0)
    }

    fn draw(
        &mut self,
        _critical_weight: f64,
        bias: Option<&BiasFn>,
    ) -> Result<SourceParticle, PoolError> {
        let mut record = self.record;
        if let Some(bias) = bias {
            record.weight *= bias(&record);
        }
        Ok(record)
    }
}

fn source_emitting(
    record: SourceParticle,
) -> ParticleSource<impl phasemix::pool::PoolProvider<Pool = FixedPool>> {
    let provider =
        move |_: &[SourceEntry]| -> Result<FixedPool, PoolError> { Ok(FixedPool { record }) };
    let config = SourceConfig::new().source("tracks.ssv", 1.0).seed(1);
    ParticleSource::new(config, provider).unwrap()
}

fn neutron_record() -> SourceParticle {
    SourceParticle {
        kind_tag: 'n',
        position: [10.0, -2.0, 0.5],
        direction: [0.6, 0.0, 0.8],
        energy: 2.45,
        weight: 0.9,
    }
}

// =============================================================================
// TYPE DECODING
// =============================================================================

#[test]
fn neutron_record_maps_to_host_code_one() {
    let mut source = source_emitting(neutron_record());
    let emission = source.next_particle().unwrap();

    assert_eq!(emission.kind(), ParticleKind::Neutron);
    assert_eq!(emission.host_code(), 1);
    assert_eq!(
        emission.resolution,
        KindResolution::Recognized(ParticleKind::Neutron)
    );
    assert_eq!(emission.weight, 0.9);
}

#[test]
fn photon_record_maps_to_host_code_two() {
    let mut record = neutron_record();
    record.kind_tag = 'p';
    let mut source = source_emitting(record);
    let emission = source.next_particle().unwrap();

    assert_eq!(emission.kind(), ParticleKind::Photon);
    assert_eq!(emission.host_code(), 2);
}

#[test]
fn unrecognized_tag_defaults_to_neutron_with_tagged_outcome() {
    let mut record = neutron_record();
    record.kind_tag = 'x';
    let mut source = source_emitting(record);
    let emission = source.next_particle().unwrap();

    assert_eq!(
        emission.resolution,
        KindResolution::Defaulted { original: 'x' }
    );
    assert_eq!(emission.host_code(), 1);
    // Kinematics and weight pass through unchanged.
    assert_eq!(emission.energy, 2.45);
    assert_eq!(emission.weight, 0.9);
    assert_eq!(emission.direction, [0.6, 0.0, 0.8]);
}

#[test]
fn defaulted_records_still_count_toward_statistics() {
    let mut record = neutron_record();
    record.kind_tag = '?';
    let mut source = source_emitting(record);

    for _ in 0..5 {
        source.next_particle().unwrap();
    }
    let tally = source.tally();
    assert_eq!(tally.count, 5);
    assert!((tally.weight_sum - 4.5).abs() < 1e-12);
}

// =============================================================================
// SURFACE NUDGE
// =============================================================================

#[test]
fn position_is_nudged_along_the_direction() {
    let mut source = source_emitting(neutron_record());
    let emission = source.next_particle().unwrap();

    assert!((emission.position[0] - (10.0 + SURFACE_NUDGE * 0.6)).abs() < 1e-15);
    assert!((emission.position[1] - -2.0).abs() < 1e-15);
    assert!((emission.position[2] - (0.5 + SURFACE_NUDGE * 0.8)).abs() < 1e-15);
    assert_eq!(emission.direction, [0.6, 0.0, 0.8]);
}

// =============================================================================
// BIAS FORWARDING
// =============================================================================

#[test]
fn bias_correction_reaches_the_emitted_weight() {
    let mut source = source_emitting(neutron_record()).with_bias(|p| p.energy);

    let emission = source.next_particle().unwrap();
    assert!((emission.weight - 0.9 * 2.45).abs() < 1e-12);
    assert!((source.tally().weight_sum - 0.9 * 2.45).abs() < 1e-12);
}

#[test]
fn unbiased_source_passes_weights_through() {
    let mut source = source_emitting(neutron_record());
    let emission = source.next_particle().unwrap();
    assert_eq!(emission.weight, 0.9);
}
