//! One headless run: drives frames, polls analytics, and saves a snapshot
//! on exit.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use helio_config::Config;
use helio_sim::{Favorite, FrameDriver, Renderer, SceneView, SimulationSnapshot};
use tracing::{debug, info, trace, warn};

use crate::error::AppError;

/// Stands in for a GPU renderer: walks the scene each frame and keeps
/// counts for the analytics log.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub visible_bodies: usize,
    pub trail_vertices: usize,
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, scene: &SceneView<'_>) {
        self.frames += 1;
        self.visible_bodies = scene
            .bodies()
            .iter()
            .filter(|body| scene.lod(body.id()).is_none_or(|state| state.visible))
            .count();
        self.trail_vertices = scene
            .trails()
            .map(|(_, trail)| trail.to_line_vertices().len() / 3)
            .sum();
        trace!(
            visible = self.visible_bodies,
            trail_vertices = self.trail_vertices,
            "frame drawn"
        );
    }
}

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub frames: u64,
    pub orbit_updates: u64,
    pub sim_date: DateTime<Utc>,
    pub snapshot_path: PathBuf,
}

pub struct Session {
    driver: FrameDriver,
    renderer: HeadlessRenderer,
    data_dir: PathBuf,
    favorites: Vec<Favorite>,
    metrics_interval: f64,
    since_metrics: f64,
}

impl Session {
    /// Build the driver and pick up bookmarks from a previous run's snapshot.
    pub fn new(config: &Config, data_dir: &Path) -> Result<Self, AppError> {
        let driver = FrameDriver::from_config(config)?;
        let favorites = match SimulationSnapshot::load(data_dir) {
            Ok(Some(previous)) => previous.favorites,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Ignoring unreadable snapshot: {e}");
                Vec::new()
            }
        };
        Ok(Self {
            driver,
            renderer: HeadlessRenderer::default(),
            data_dir: data_dir.to_path_buf(),
            favorites,
            metrics_interval: config.debug.metrics_interval,
            since_metrics: 0.0,
        })
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }

    pub fn renderer(&self) -> &HeadlessRenderer {
        &self.renderer
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Run one frame of `real_dt` seconds.
    pub fn step(&mut self, real_dt: f64) {
        let report = self.driver.tick_and_render(real_dt, &mut self.renderer);
        for event in &report.lod_events {
            debug!(?event, "LOD event");
        }
        if let Some(fps) = report.fps {
            trace!(fps, "FPS window closed");
        }

        self.since_metrics += real_dt;
        if self.metrics_interval > 0.0 && self.since_metrics >= self.metrics_interval {
            self.since_metrics = 0.0;
            self.log_analytics();
        }
    }

    fn log_analytics(&self) {
        let sample = self.driver.analytics();
        info!(
            fps = sample.fps,
            sim_date = %sample.sim_date.format("%Y-%m-%d %H:%M"),
            visible = sample.lod.visible_objects,
            total = sample.lod.total_objects,
            avg_distance = sample.lod.average_distance,
            trail_points = sample.trail_points,
            trail_vertices = self.renderer.trail_vertices,
            "analytics"
        );
    }

    /// Save the snapshot, carrying bookmarks forward, and summarise the run.
    pub fn finish(self) -> Result<SessionSummary, AppError> {
        let mut snapshot = self.driver.snapshot();
        snapshot.favorites = self.favorites;
        let snapshot_path = snapshot.save(&self.data_dir)?;
        info!(path = %snapshot_path.display(), "Snapshot saved");
        Ok(SessionSummary {
            frames: self.renderer.frames,
            orbit_updates: self.driver.world().update_count(),
            sim_date: self.driver.clock().date(),
            snapshot_path,
        })
    }
}
