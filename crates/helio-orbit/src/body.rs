//! Celestial body records stored in the world arena.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Index of a body in the world arena. Stable for the lifetime of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub(crate) u32);

impl BodyId {
    /// Position of this body in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Broad classification carried for display and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
}

/// Immutable visual/physical descriptors. Not used by the orbital math.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Render radius in scene units.
    pub radius: f64,
    /// Axial tilt in degrees.
    pub axial_tilt_deg: f64,
    /// Base colour as 0xRRGGBB.
    pub color: u32,
    pub kind: BodyKind,
}

/// Orbit of a moon around a parent body, resolved through the arena.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitingSatellite {
    pub parent: BodyId,
    /// Orbit radius around the parent.
    pub local_distance: f64,
    /// Revolution rate; negative values orbit retrograde.
    pub angular_speed: f64,
}

/// How a body moves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Orbit {
    /// Pinned at the origin; never advances.
    Central,
    /// Circular orbit around the origin.
    Primary { distance: f64, angular_speed: f64 },
    /// Circular orbit around another body.
    Satellite(OrbitingSatellite),
}

impl Orbit {
    /// Parent body, if this is a satellite orbit.
    pub fn parent(&self) -> Option<BodyId> {
        match self {
            Orbit::Satellite(sat) => Some(sat.parent),
            _ => None,
        }
    }

    /// Orbit radius relative to whatever the body circles (0 for the central body).
    pub fn radius(&self) -> f64 {
        match self {
            Orbit::Central => 0.0,
            Orbit::Primary { distance, .. } => *distance,
            Orbit::Satellite(sat) => sat.local_distance,
        }
    }

    /// Revolution rate (0 for the central body).
    pub fn angular_speed(&self) -> f64 {
        match self {
            Orbit::Central => 0.0,
            Orbit::Primary { angular_speed, .. } => *angular_speed,
            Orbit::Satellite(sat) => sat.angular_speed,
        }
    }
}

/// A body in the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub(crate) id: BodyId,
    pub(crate) name: String,
    pub(crate) orbit: Orbit,
    /// Orbital angle in radians. Never wrapped; trig handles any magnitude.
    pub(crate) angle: f64,
    /// Self-rotation angle in radians.
    pub(crate) spin_angle: f64,
    pub(crate) spin_rate: f64,
    /// Recomputed from `angle` on every update, never accumulated.
    pub(crate) position: DVec3,
    pub(crate) descriptor: BodyDescriptor,
}

impl CelestialBody {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn spin_angle(&self) -> f64 {
        self.spin_angle
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn descriptor(&self) -> &BodyDescriptor {
        &self.descriptor
    }

    pub fn is_central(&self) -> bool {
        matches!(self.orbit, Orbit::Central)
    }

    /// Current pose, as shipped between compute strategies.
    pub fn pose(&self) -> BodyPose {
        BodyPose {
            id: self.id,
            angle: self.angle,
            spin_angle: self.spin_angle,
            position: self.position,
        }
    }
}

/// The mutable part of a body after one update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyPose {
    pub id: BodyId,
    pub angle: f64,
    pub spin_angle: f64,
    pub position: DVec3,
}
