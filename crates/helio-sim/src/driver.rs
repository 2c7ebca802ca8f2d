//! The per-frame orchestration.
//!
//! Each tick runs, in order: orbits (through the compute strategy) and
//! trails, the throttled LOD pass, and the camera transition. Pause and time
//! speed gate only the first step; LOD and camera always run on real time.

use glam::DVec3;
use helio_camera::{CameraController, CameraState};
use helio_config::{CameraConfig, Config, InitialAngles, LodConfig};
use helio_lod::{LodClassifier, LodEvent, LodSelector, LodThresholds};
use helio_orbit::{BodyId, SimulationWorld};
use tracing::{info, warn};

use crate::clock::SimulationClock;
use crate::error::SimError;
use crate::scene::{AnalyticsSample, Renderer, SceneView};
use crate::snapshot::{SNAPSHOT_VERSION, SimulationSnapshot};
use crate::stats::FrameStats;
use crate::strategy::{InProcessStrategy, OffloadedStrategy, PositionComputeStrategy, StepOutcome};

/// What happened during one tick.
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    /// Scaled seconds fed to the orbits; 0 when paused.
    pub sim_dt: f64,
    /// `None` when orbital motion was skipped.
    pub orbit: Option<StepOutcome>,
    /// Whether the LOD interval elapsed and a pass ran.
    pub lod_pass: bool,
    pub lod_events: Vec<LodEvent<BodyId>>,
    pub camera_transitioning: bool,
    /// Set once per second when the FPS window closes.
    pub fps: Option<f64>,
}

pub struct FrameDriver {
    world: SimulationWorld,
    strategy: Box<dyn PositionComputeStrategy>,
    lod: LodClassifier<BodyId>,
    camera: CameraController,
    clock: SimulationClock,
    stats: FrameStats,
    paused: bool,
    time_speed: f64,
    home: CameraState,
    fly_to_radius_factor: f64,
}

impl FrameDriver {
    /// Build the catalog world, LOD classifier, camera, and compute strategy
    /// described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        let world = SimulationWorld::from_config(&config.simulation, &config.trails)?;
        let strategy: Box<dyn PositionComputeStrategy> = if config.worker.offload {
            match OffloadedStrategy::spawn(world.orbital_state()) {
                Ok(offloaded) => Box::new(offloaded),
                Err(e) => {
                    warn!("Falling back to in-process orbits: {e}");
                    Box::new(InProcessStrategy)
                }
            }
        } else {
            Box::new(InProcessStrategy)
        };
        Self::new(world, strategy, config)
    }

    /// Assemble a driver around an existing world and strategy.
    pub fn new(
        world: SimulationWorld,
        strategy: Box<dyn PositionComputeStrategy>,
        config: &Config,
    ) -> Result<Self, SimError> {
        let lod = build_classifier(&config.lod, &world)?;
        let home = home_camera(&config.camera);
        let camera = CameraController::new(home, config.camera.transition_duration)?;
        check_time_speed(config.simulation.time_speed)?;

        let mut driver = Self {
            world,
            strategy,
            lod,
            camera,
            clock: SimulationClock::starting_now(),
            stats: FrameStats::new(),
            paused: config.simulation.start_paused,
            time_speed: config.simulation.time_speed,
            home,
            fly_to_radius_factor: config.camera.fly_to_radius_factor,
        };
        driver.reclassify_now();
        info!(
            bodies = driver.world.len(),
            strategy = driver.strategy.name(),
            "Frame driver ready"
        );
        Ok(driver)
    }

    pub fn with_clock(mut self, clock: SimulationClock) -> Self {
        self.clock = clock;
        self
    }

    /// Advance one frame of `real_dt` wall-clock seconds.
    pub fn tick(&mut self, real_dt: f64) -> FrameReport {
        let real_dt = if real_dt.is_finite() { real_dt.max(0.0) } else { 0.0 };
        let mut report = FrameReport::default();

        if !self.paused && self.time_speed > 0.0 {
            let sim_dt = real_dt * self.time_speed;
            report.sim_dt = sim_dt;
            report.orbit = Some(self.step_orbits(sim_dt));
            self.clock.advance(sim_dt);
        }

        let camera = self.camera.camera().position;
        let world = &self.world;
        report.lod_pass = self.lod.update(real_dt, camera, |id| world.position(id));
        report.lod_events = self.lod.drain_events();

        self.camera.advance(real_dt);
        report.camera_transitioning = self.camera.is_transitioning();
        report.fps = self.stats.record_frame(real_dt);
        report
    }

    /// [`tick`](Self::tick), then hand the scene to `renderer`.
    pub fn tick_and_render(&mut self, real_dt: f64, renderer: &mut dyn Renderer) -> FrameReport {
        let report = self.tick(real_dt);
        renderer.draw(&self.scene());
        report
    }

    fn step_orbits(&mut self, sim_dt: f64) -> StepOutcome {
        match self.strategy.advance(&mut self.world, sim_dt) {
            Ok(outcome) => outcome,
            Err(e) => {
                // Includes this frame's step and anything the worker never answered.
                let replay = self.strategy.unapplied_time();
                warn!(
                    strategy = self.strategy.name(),
                    replay,
                    "Orbit strategy failed, falling back to in-process: {e}"
                );
                self.strategy = Box::new(InProcessStrategy);
                if replay <= 0.0 {
                    return StepOutcome::default();
                }
                self.world.advance(replay);
                StepOutcome {
                    poses_applied: self.world.len(),
                    batches_applied: 1,
                }
            }
        }
    }

    fn resync_strategy(&mut self) {
        if let Err(e) = self.strategy.resync(&self.world) {
            warn!(
                strategy = self.strategy.name(),
                "Orbit strategy lost on reset, falling back to in-process: {e}"
            );
            self.strategy = Box::new(InProcessStrategy);
        }
    }

    /// Run a LOD pass immediately, outside the throttle.
    pub fn reclassify_now(&mut self) {
        let camera = self.camera.camera().position;
        let world = &self.world;
        self.lod.reclassify(camera, |id| world.position(id));
    }

    pub fn scene(&self) -> SceneView<'_> {
        SceneView {
            world: &self.world,
            lod: &self.lod,
            camera: self.camera.camera(),
        }
    }

    // --- input surface ---

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            info!(paused, "Simulation pause toggled");
        }
        self.paused = paused;
    }

    /// Flip pause and return the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// 0 freezes orbits like pause; negative or non-finite is rejected.
    pub fn set_time_speed(&mut self, time_speed: f64) -> Result<(), SimError> {
        check_time_speed(time_speed)?;
        self.time_speed = time_speed;
        Ok(())
    }

    pub fn time_speed(&self) -> f64 {
        self.time_speed
    }

    pub fn fly_to(&mut self, position: DVec3, target: DVec3) -> Result<(), SimError> {
        self.camera.fly_to(position, target)?;
        Ok(())
    }

    /// Fly to a named body, framed by its radius.
    pub fn fly_to_body(&mut self, name: &str) -> Result<(), SimError> {
        let id = self.world.lookup(name)?;
        let (position, radius) = self
            .world
            .body(id)
            .map(|b| (b.position(), b.descriptor().radius))
            .ok_or_else(|| helio_orbit::OrbitError::UnknownBody(name.to_string()))?;
        self.camera
            .fly_to_body(position, radius, self.fly_to_radius_factor)?;
        info!(body = name, "Flying to body");
        Ok(())
    }

    pub fn reset_view(&mut self) -> Result<(), SimError> {
        self.camera.reset_view(self.home)?;
        Ok(())
    }

    /// Returns whether trails are now visible.
    pub fn toggle_trails_visible(&mut self) -> bool {
        self.world.trails_mut().toggle_visible()
    }

    pub fn clear_trails(&mut self) {
        self.world.trails_mut().clear_all();
    }

    /// Put a named body back at `angle`. Its trail and those of its
    /// satellites are cleared.
    pub fn reset_body(&mut self, name: &str, angle: f64) -> Result<(), SimError> {
        let id = self.world.lookup(name)?;
        self.world.reset_body(id, angle)?;
        self.resync_strategy();
        info!(body = name, angle, "Body orbit reset");
        Ok(())
    }

    /// Re-draw every body's angle and clear all trails.
    pub fn reset_orbits(&mut self, seeding: InitialAngles) -> Result<(), SimError> {
        self.world.reset_angles(seeding)?;
        self.resync_strategy();
        info!(?seeding, "All orbits reset");
        Ok(())
    }

    // --- read surface ---

    pub fn world(&self) -> &SimulationWorld {
        &self.world
    }

    pub fn lod(&self) -> &LodClassifier<BodyId> {
        &self.lod
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn analytics(&self) -> AnalyticsSample {
        AnalyticsSample {
            lod: self.lod.metrics(),
            trail_points: self.world.trails().total_points(),
            sim_date: self.clock.date(),
            fps: self.stats.fps(),
        }
    }

    // --- persistence boundary ---

    /// Copy the persistable fields out. Favorites start empty.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now(),
            camera: *self.camera.camera(),
            time_speed: self.time_speed,
            paused: self.paused,
            show_trails: self.world.trails().is_visible(),
            favorites: Vec::new(),
        }
    }

    /// Copy persisted fields back in. The camera snaps to the saved view and
    /// any transition is cancelled.
    pub fn restore(&mut self, snapshot: &SimulationSnapshot) -> Result<(), SimError> {
        self.set_time_speed(snapshot.time_speed)?;
        self.set_paused(snapshot.paused);
        self.world.trails_mut().set_visible(snapshot.show_trails);
        self.camera.set_camera(snapshot.camera);
        Ok(())
    }
}

fn check_time_speed(time_speed: f64) -> Result<(), SimError> {
    if !time_speed.is_finite() || time_speed < 0.0 {
        return Err(SimError::InvalidTimeSpeed(time_speed));
    }
    Ok(())
}

fn home_camera(config: &CameraConfig) -> CameraState {
    CameraState::new(
        DVec3::from_array(config.home_position),
        DVec3::from_array(config.home_target),
    )
}

fn build_classifier(
    config: &LodConfig,
    world: &SimulationWorld,
) -> Result<LodClassifier<BodyId>, SimError> {
    let thresholds = LodThresholds::custom(
        config.medium_distance,
        config.low_distance,
        config.ultra_low_distance,
        config.max_visible_distance,
    )?;
    let selector = LodSelector::new(thresholds).with_hysteresis(config.hysteresis)?;
    let mut lod = LodClassifier::new(selector, config.update_interval)?;
    for body in world.bodies() {
        lod.register(body.id());
    }
    Ok(lod)
}
