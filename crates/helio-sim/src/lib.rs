//! The Helio frame driver: one tick advances orbits and trails, reclassifies
//! LOD, eases the camera, and hands a read-only scene to the renderer.
//!
//! Orbital positions are computed by a [`PositionComputeStrategy`], either
//! in-process or on a background worker thread.

mod clock;
mod driver;
mod error;
mod scene;
mod snapshot;
mod stats;
mod strategy;

pub use clock::SimulationClock;
pub use driver::{FrameDriver, FrameReport};
pub use error::{SimError, SnapshotError};
pub use scene::{AnalyticsSample, Renderer, SceneView};
pub use snapshot::{Favorite, SNAPSHOT_FILE, SNAPSHOT_VERSION, SimulationSnapshot};
pub use stats::FrameStats;
pub use strategy::{InProcessStrategy, OffloadedStrategy, PositionComputeStrategy, StepOutcome};

pub use helio_camera::{CameraController, CameraState};
