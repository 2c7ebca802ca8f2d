//! Simulation and snapshot error types.

use helio_camera::CameraError;
use helio_lod::LodError;
use helio_orbit::OrbitError;

/// Errors raised while building or driving the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Time speed must be finite and non-negative.
    #[error("invalid time speed {0}: must be finite and non-negative")]
    InvalidTimeSpeed(f64),

    #[error(transparent)]
    Orbit(#[from] OrbitError),

    #[error(transparent)]
    Lod(#[from] LodError),

    #[error(transparent)]
    Camera(#[from] CameraError),

    /// The background position worker could not be started or has gone away.
    #[error("position worker unavailable: {0}")]
    WorkerUnavailable(String),
}

/// Errors from saving or loading a [`SimulationSnapshot`](crate::SimulationSnapshot).
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write snapshot: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to parse snapshot: {0}")]
    Parse(#[source] ron::error::SpannedError),

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] ron::Error),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}
