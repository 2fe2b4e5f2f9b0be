//! Post-processing of raw pool records into host-ready emissions.
//!
//! Two normalizations happen here, both stateless:
//!
//! - the recorded type tag is decoded into a host species, falling back to
//!   neutron for unrecognized tags (the fallback is tagged, not silent)
//! - the position is nudged off the recording surface along the direction
//!   of flight, so the downstream geometry never sees a zero-distance
//!   boundary crossing

use crate::constants::SURFACE_NUDGE;
use crate::types::{Emission, KindResolution, ParticleKind, SourceParticle};

/// Decode a recorded type tag into a host species, tagging the fallback.
pub fn resolve_kind(tag: char) -> KindResolution {
    match ParticleKind::from_tag(tag) {
        Some(kind) => KindResolution::Recognized(kind),
        None => KindResolution::Defaulted { original: tag },
    }
}

/// Push a position off the source surface along the direction of flight.
pub fn nudge_off_surface(position: [f64; 3], direction: [f64; 3]) -> [f64; 3] {
    [
        position[0] + SURFACE_NUDGE * direction[0],
        position[1] + SURFACE_NUDGE * direction[1],
        position[2] + SURFACE_NUDGE * direction[2],
    ]
}

/// Normalize one raw pool record into a host-ready emission.
///
/// Kinematics, energy, and weight pass through unchanged apart from the
/// surface nudge, which is applied unconditionally after type decoding.
pub fn adapt_record(record: &SourceParticle) -> Emission {
    let resolution = resolve_kind(record.kind_tag);
    Emission {
        resolution,
        position: nudge_off_surface(record.position, record.direction),
        direction: record.direction,
        energy: record.energy,
        weight: record.weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: char) -> SourceParticle {
        SourceParticle {
            kind_tag: tag,
            position: [1.0, 2.0, 3.0],
            direction: [0.0, 0.6, 0.8],
            energy: 14.1,
            weight: 0.75,
        }
    }

    #[test]
    fn neutron_decodes() {
        let emission = adapt_record(&record('n'));
        assert_eq!(emission.kind(), ParticleKind::Neutron);
        assert_eq!(emission.host_code(), 1);
        assert!(!emission.resolution.is_defaulted());
    }

    #[test]
    fn photon_decodes() {
        let emission = adapt_record(&record('p'));
        assert_eq!(emission.kind(), ParticleKind::Photon);
        assert_eq!(emission.host_code(), 2);
    }

    #[test]
    fn unknown_tag_defaults_to_neutron() {
        let emission = adapt_record(&record('x'));
        assert_eq!(emission.kind(), ParticleKind::Neutron);
        assert_eq!(
            emission.resolution,
            KindResolution::Defaulted { original: 'x' }
        );
        // Kinematics pass through unchanged.
        assert_eq!(emission.energy, 14.1);
        assert_eq!(emission.weight, 0.75);
        assert_eq!(emission.direction, [0.0, 0.6, 0.8]);
    }

    #[test]
    fn position_is_nudged_along_direction() {
        let emission = adapt_record(&record('n'));
        assert!((emission.position[0] - 1.0).abs() < 1e-15);
        assert!((emission.position[1] - (2.0 + SURFACE_NUDGE * 0.6)).abs() < 1e-15);
        assert!((emission.position[2] - (3.0 + SURFACE_NUDGE * 0.8)).abs() < 1e-15);
    }

    #[test]
    fn nudge_is_applied_for_defaulted_kinds_too() {
        let emission = adapt_record(&record('?'));
        assert!((emission.position[1] - (2.0 + SURFACE_NUDGE * 0.6)).abs() < 1e-15);
    }

    #[test]
    fn zero_direction_leaves_position_unchanged() {
        let mut rec = record('n');
        rec.direction = [0.0; 3];
        let emission = adapt_record(&rec);
        assert_eq!(emission.position, [1.0, 2.0, 3.0]);
    }
}
