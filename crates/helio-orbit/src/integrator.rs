//! Circular-orbit integration.
//!
//! Each update advances a body's angle by `(angular_speed / distance) * dt * K`
//! and recomputes its position on the ecliptic (`y = 0`). Satellites add their
//! local offset to the parent's position, so the arena must list parents
//! before children.

use glam::DVec3;

use crate::body::{BodyPose, CelestialBody, Orbit};
use crate::error::OrbitError;

/// Position on a circle of the given radius in the XZ plane.
pub fn planar_offset(angle: f64, distance: f64) -> DVec3 {
    DVec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Stateless orbit stepper parameterised by the scale constant `K`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitIntegrator {
    orbit_scale: f64,
}

impl OrbitIntegrator {
    /// Create an integrator. `orbit_scale` must be finite and positive.
    pub fn new(orbit_scale: f64) -> Result<Self, OrbitError> {
        if !orbit_scale.is_finite() || orbit_scale <= 0.0 {
            return Err(OrbitError::InvalidOrbitScale(orbit_scale));
        }
        Ok(Self { orbit_scale })
    }

    pub fn orbit_scale(&self) -> f64 {
        self.orbit_scale
    }

    /// Angle after `dt` simulated seconds. `distance` is validated non-zero
    /// when the body is added to the world.
    pub fn advance_angle(&self, angle: f64, angular_speed: f64, distance: f64, dt: f64) -> f64 {
        angle + (angular_speed / distance) * dt * self.orbit_scale
    }

    /// Advance every body by `dt`, in arena order.
    pub fn step(&self, bodies: &mut [CelestialBody], dt: f64) {
        for i in 0..bodies.len() {
            let orbit = bodies[i].orbit;
            let body = &mut bodies[i];
            match orbit {
                Orbit::Central => continue,
                Orbit::Primary {
                    distance,
                    angular_speed,
                } => {
                    body.angle = self.advance_angle(body.angle, angular_speed, distance, dt);
                }
                Orbit::Satellite(sat) => {
                    body.angle =
                        self.advance_angle(body.angle, sat.angular_speed, sat.local_distance, dt);
                }
            }
            body.spin_angle += body.spin_rate * dt;
        }
        resolve_positions(bodies);
    }
}

/// Recompute every position from the current angles without advancing time.
pub(crate) fn resolve_positions(bodies: &mut [CelestialBody]) {
    for i in 0..bodies.len() {
        let position = match bodies[i].orbit {
            Orbit::Central => DVec3::ZERO,
            Orbit::Primary { distance, .. } => planar_offset(bodies[i].angle, distance),
            Orbit::Satellite(sat) => {
                let parent = bodies[sat.parent.index()].position;
                parent + planar_offset(bodies[i].angle, sat.local_distance)
            }
        };
        bodies[i].position = position;
    }
}

/// The purely orbital part of a world: what a background worker needs to
/// compute poses without touching trails or lookups.
#[derive(Clone, Debug)]
pub struct OrbitalState {
    pub(crate) bodies: Vec<CelestialBody>,
    pub(crate) integrator: OrbitIntegrator,
}

impl OrbitalState {
    /// Advance all bodies by `dt` simulated seconds.
    pub fn advance(&mut self, dt: f64) {
        self.integrator.step(&mut self.bodies, dt);
    }

    /// Current pose of every body, in arena order.
    pub fn poses(&self) -> Vec<BodyPose> {
        self.bodies.iter().map(CelestialBody::pose).collect()
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn integrator(&self) -> &OrbitIntegrator {
        &self.integrator
    }
}
