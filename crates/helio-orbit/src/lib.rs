//! Orbital state for the Helio simulator: body catalog, the world arena,
//! circular-orbit integration, bounded position trails, and a few planar
//! orbital-analysis helpers.

pub mod analysis;
mod body;
pub mod catalog;
mod error;
mod integrator;
mod trail;
mod world;

pub use analysis::{LagrangePoints, Resonance, lagrange_points, orbital_resonance};
pub use body::{BodyDescriptor, BodyId, BodyKind, BodyPose, CelestialBody, Orbit, OrbitingSatellite};
pub use error::OrbitError;
pub use integrator::{OrbitIntegrator, OrbitalState, planar_offset};
pub use trail::{TrailBuffer, TrailStore};
pub use world::{BodySpec, OrbitSpec, SimulationWorld, WorldBuilder};
