//! The read-only view handed to the renderer and analytics collaborators.

use chrono::{DateTime, Utc};
use helio_camera::CameraState;
use helio_lod::{LodClassifier, LodMetrics, LodState};
use helio_orbit::{BodyId, CelestialBody, SimulationWorld, TrailBuffer};
use serde::Serialize;

/// Draws one frame from a [`SceneView`]. Called once per tick after all
/// state updates.
pub trait Renderer {
    fn draw(&mut self, scene: &SceneView<'_>);
}

/// Borrowed view of everything a renderer needs for one frame.
pub struct SceneView<'a> {
    pub(crate) world: &'a SimulationWorld,
    pub(crate) lod: &'a LodClassifier<BodyId>,
    pub(crate) camera: &'a CameraState,
}

impl<'a> SceneView<'a> {
    pub fn bodies(&self) -> &'a [CelestialBody] {
        self.world.bodies()
    }

    pub fn lod(&self, id: BodyId) -> Option<&'a LodState> {
        self.lod.state(id)
    }

    /// Trails to draw, empty while trails are hidden.
    pub fn trails(&self) -> impl Iterator<Item = (BodyId, &'a TrailBuffer)> {
        let visible = self.world.trails().is_visible();
        self.world.trails().iter().filter(move |_| visible)
    }

    pub fn trails_visible(&self) -> bool {
        self.world.trails().is_visible()
    }

    pub fn camera(&self) -> &'a CameraState {
        self.camera
    }
}

/// One poll of the analytics overlay.
#[derive(Clone, Debug, Serialize)]
pub struct AnalyticsSample {
    pub lod: LodMetrics,
    pub trail_points: usize,
    pub sim_date: DateTime<Utc>,
    pub fps: f64,
}
