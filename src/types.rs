//! Particle records and type decoding.

use serde::{Deserialize, Serialize};

/// Particle species understood by the transport host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Neutron, host code 1.
    Neutron,
    /// Photon, host code 2.
    Photon,
}

impl ParticleKind {
    /// Decode a single-character type tag from a recorded particle list.
    ///
    /// Returns `None` for tags the host has no code for.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'n' => Some(ParticleKind::Neutron),
            'p' => Some(ParticleKind::Photon),
            _ => None,
        }
    }

    /// The single-character tag used in recorded particle lists.
    pub fn tag(&self) -> char {
        match self {
            ParticleKind::Neutron => 'n',
            ParticleKind::Photon => 'p',
        }
    }

    /// The integer particle-type identifier expected by the transport host.
    pub fn host_code(&self) -> i32 {
        match self {
            ParticleKind::Neutron => 1,
            ParticleKind::Photon => 2,
        }
    }
}

/// Outcome of decoding a recorded type tag.
///
/// An unrecognized tag is not fatal: the particle is emitted as a neutron
/// and the original tag is preserved here so callers can assert on the
/// fallback instead of scraping console text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KindResolution {
    /// The tag mapped onto a species the host understands.
    Recognized(ParticleKind),
    /// The tag was unrecognized; the particle is emitted as a neutron.
    Defaulted {
        /// The tag as it appeared in the record.
        original: char,
    },
}

impl KindResolution {
    /// The species the particle is emitted as.
    pub fn kind(&self) -> ParticleKind {
        match self {
            KindResolution::Recognized(kind) => *kind,
            KindResolution::Defaulted { .. } => ParticleKind::Neutron,
        }
    }

    /// Whether the neutron fallback was taken.
    pub fn is_defaulted(&self) -> bool {
        matches!(self, KindResolution::Defaulted { .. })
    }
}

/// One sampled particle as produced by a source pool.
///
/// This is the raw record: the type tag is still a character and the
/// position has not been moved off the recording surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceParticle {
    /// Single-character type tag ('n' for neutron, 'p' for photon).
    pub kind_tag: char,
    /// Position on the recording surface, in host length units.
    pub position: [f64; 3],
    /// Unit direction of flight.
    pub direction: [f64; 3],
    /// Kinetic energy in host energy units.
    pub energy: f64,
    /// Statistical weight, with any bias correction already applied.
    pub weight: f64,
}

/// One particle's starting state as handed to the transport host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    /// How the recorded type tag was decoded.
    pub resolution: KindResolution,
    /// Starting position, nudged off the source surface.
    pub position: [f64; 3],
    /// Unit direction of flight.
    pub direction: [f64; 3],
    /// Kinetic energy in host energy units.
    pub energy: f64,
    /// Statistical weight.
    pub weight: f64,
}

impl Emission {
    /// The emitted species.
    pub fn kind(&self) -> ParticleKind {
        self.resolution.kind()
    }

    /// The integer particle-type identifier expected by the transport host.
    pub fn host_code(&self) -> i32 {
        self.kind().host_code()
    }
}
