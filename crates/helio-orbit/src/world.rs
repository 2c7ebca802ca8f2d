//! The simulation world: an arena of bodies, a name index, and their trails.

use std::f64::consts::TAU;

use glam::DVec3;
use helio_config::{InitialAngles, SimulationConfig, TrailConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::body::{
    BodyDescriptor, BodyId, BodyKind, BodyPose, CelestialBody, Orbit, OrbitingSatellite,
};
use crate::catalog::{self, CatalogEntry};
use crate::error::OrbitError;
use crate::integrator::{OrbitIntegrator, OrbitalState, resolve_positions};
use crate::trail::TrailStore;

/// Orbit description by parent name, before ids are assigned.
#[derive(Clone, Debug, PartialEq)]
pub enum OrbitSpec {
    Central,
    Primary {
        distance: f64,
        angular_speed: f64,
    },
    Satellite {
        parent: String,
        distance: f64,
        angular_speed: f64,
    },
}

/// Everything needed to add one body to a [`WorldBuilder`].
#[derive(Clone, Debug, PartialEq)]
pub struct BodySpec {
    pub name: String,
    pub orbit: OrbitSpec,
    pub descriptor: BodyDescriptor,
    /// Self-rotation rate in radians per simulated second.
    pub spin_rate: f64,
    /// Starting angle; `None` defers to the builder's [`InitialAngles`].
    pub initial_angle: Option<f64>,
}

impl BodySpec {
    /// A catalog row with the configured spin rates.
    pub fn from_catalog(entry: &CatalogEntry, sim: &SimulationConfig) -> Self {
        let orbit = match (entry.kind, entry.parent) {
            (BodyKind::Star, _) => OrbitSpec::Central,
            (_, Some(parent)) => OrbitSpec::Satellite {
                parent: parent.to_string(),
                distance: entry.distance,
                angular_speed: entry.speed,
            },
            (_, None) => OrbitSpec::Primary {
                distance: entry.distance,
                angular_speed: entry.speed,
            },
        };
        let spin_rate = match entry.kind {
            BodyKind::Star => 0.0,
            BodyKind::Moon => sim.satellite_spin_rate,
            BodyKind::Planet | BodyKind::DwarfPlanet => sim.spin_rate,
        };
        Self {
            name: entry.name.to_string(),
            orbit,
            descriptor: BodyDescriptor {
                radius: entry.radius,
                axial_tilt_deg: entry.tilt_deg,
                color: entry.color,
                kind: entry.kind,
            },
            spin_rate,
            initial_angle: None,
        }
    }
}

fn check_finite(name: &str, field: &'static str, value: f64) -> Result<(), OrbitError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OrbitError::NonFiniteParameter {
            name: name.to_string(),
            field,
        })
    }
}

fn check_distance(name: &str, distance: f64) -> Result<(), OrbitError> {
    check_finite(name, "distance", distance)?;
    if distance <= 0.0 {
        return Err(OrbitError::ZeroDistance {
            name: name.to_string(),
            distance,
        });
    }
    Ok(())
}

fn draw_angles(count: usize, seeding: InitialAngles) -> Vec<f64> {
    match seeding {
        InitialAngles::Random => {
            let mut rng = rand::rng();
            (0..count).map(|_| rng.random_range(0.0..TAU)).collect()
        }
        InitialAngles::Seeded(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..count).map(|_| rng.random_range(0.0..TAU)).collect()
        }
        InitialAngles::Fixed(angle) => vec![angle; count],
    }
}

/// Validates bodies one at a time and assembles a [`SimulationWorld`].
pub struct WorldBuilder {
    integrator: OrbitIntegrator,
    bodies: Vec<CelestialBody>,
    explicit_angles: Vec<Option<f64>>,
    names: FxHashMap<String, BodyId>,
    has_central: bool,
    trail_capacity: usize,
    trails_visible: bool,
    track_satellites: bool,
    initial_angles: InitialAngles,
}

impl WorldBuilder {
    pub fn new(integrator: OrbitIntegrator) -> Self {
        let trails = TrailConfig::default();
        Self {
            integrator,
            bodies: Vec::new(),
            explicit_angles: Vec::new(),
            names: FxHashMap::default(),
            has_central: false,
            trail_capacity: trails.max_points,
            trails_visible: trails.visible,
            track_satellites: trails.track_satellites,
            initial_angles: InitialAngles::Random,
        }
    }

    pub fn trails(mut self, config: &TrailConfig) -> Self {
        self.trail_capacity = config.max_points;
        self.trails_visible = config.visible;
        self.track_satellites = config.track_satellites;
        self
    }

    pub fn initial_angles(mut self, seeding: InitialAngles) -> Self {
        self.initial_angles = seeding;
        self
    }

    /// Validate and add a body. Satellites must name a parent added earlier,
    /// which keeps the arena in parent-before-child order.
    pub fn add(&mut self, spec: BodySpec) -> Result<BodyId, OrbitError> {
        let name = spec.name;
        if self.names.contains_key(&name) {
            return Err(OrbitError::DuplicateName(name));
        }
        check_finite(&name, "spin_rate", spec.spin_rate)?;
        if let Some(angle) = spec.initial_angle {
            check_finite(&name, "initial_angle", angle)?;
        }

        let orbit = match spec.orbit {
            OrbitSpec::Central => {
                if self.has_central {
                    return Err(OrbitError::DuplicateCentral(name));
                }
                Orbit::Central
            }
            OrbitSpec::Primary {
                distance,
                angular_speed,
            } => {
                check_distance(&name, distance)?;
                check_finite(&name, "angular_speed", angular_speed)?;
                Orbit::Primary {
                    distance,
                    angular_speed,
                }
            }
            OrbitSpec::Satellite {
                parent,
                distance,
                angular_speed,
            } => {
                let Some(&parent_id) = self.names.get(&parent) else {
                    return Err(OrbitError::UnknownParent { name, parent });
                };
                check_distance(&name, distance)?;
                check_finite(&name, "angular_speed", angular_speed)?;
                Orbit::Satellite(OrbitingSatellite {
                    parent: parent_id,
                    local_distance: distance,
                    angular_speed,
                })
            }
        };

        let id = BodyId(self.bodies.len() as u32);
        if matches!(orbit, Orbit::Central) {
            self.has_central = true;
        }
        debug!(body = %name, %id, "registered body");
        self.names.insert(name.clone(), id);
        self.explicit_angles.push(spec.initial_angle);
        self.bodies.push(CelestialBody {
            id,
            name,
            orbit,
            angle: 0.0,
            spin_angle: 0.0,
            spin_rate: spec.spin_rate,
            position: DVec3::ZERO,
            descriptor: spec.descriptor,
        });
        Ok(id)
    }

    /// Assign starting angles, resolve positions, and set up trails.
    pub fn build(self) -> Result<SimulationWorld, OrbitError> {
        if let InitialAngles::Fixed(angle) = self.initial_angles {
            check_finite("*", "initial_angles", angle)?;
        }
        let mut trails = TrailStore::new(self.trail_capacity, self.trails_visible)?;

        let mut bodies = self.bodies;
        let drawn = draw_angles(bodies.len(), self.initial_angles);
        for ((body, explicit), drawn) in bodies.iter_mut().zip(&self.explicit_angles).zip(drawn) {
            body.angle = if body.is_central() {
                0.0
            } else {
                explicit.unwrap_or(drawn)
            };
        }
        resolve_positions(&mut bodies);

        for body in &bodies {
            let tracked = match body.orbit {
                Orbit::Central => false,
                Orbit::Primary { .. } => true,
                Orbit::Satellite(_) => self.track_satellites,
            };
            if tracked {
                trails.track(body.id);
            }
        }

        info!(
            bodies = bodies.len(),
            trails = trails.tracked_count(),
            "simulation world built"
        );
        Ok(SimulationWorld {
            state: OrbitalState {
                bodies,
                integrator: self.integrator,
            },
            names: self.names,
            trails,
            update_count: 0,
        })
    }
}

/// Owns every body, its trail, and the name index. Passed explicitly to the
/// frame driver and compute strategies; there is no global registry.
#[derive(Clone, Debug)]
pub struct SimulationWorld {
    state: OrbitalState,
    names: FxHashMap<String, BodyId>,
    trails: TrailStore,
    update_count: u64,
}

impl SimulationWorld {
    pub fn builder(integrator: OrbitIntegrator) -> WorldBuilder {
        WorldBuilder::new(integrator)
    }

    /// Build the catalog solar system described by the configuration.
    pub fn from_config(sim: &SimulationConfig, trails: &TrailConfig) -> Result<Self, OrbitError> {
        let mut builder = Self::builder(OrbitIntegrator::new(sim.orbit_scale)?)
            .trails(trails)
            .initial_angles(sim.initial_angles);
        for entry in catalog::entries(sim.include_dwarf_planets, sim.include_moons) {
            builder.add(BodySpec::from_catalog(&entry, sim))?;
        }
        builder.build()
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied()
    }

    /// Like [`id_of`](Self::id_of) but with a typed error.
    pub fn lookup(&self, name: &str) -> Result<BodyId, OrbitError> {
        self.id_of(name)
            .ok_or_else(|| OrbitError::UnknownBody(name.to_string()))
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.state.bodies.get(id.index())
    }

    pub fn position(&self, id: BodyId) -> Option<DVec3> {
        self.body(id).map(CelestialBody::position)
    }

    /// Bodies in arena order.
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.state.bodies
    }

    pub fn len(&self) -> usize {
        self.state.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.bodies.is_empty()
    }

    pub fn trails(&self) -> &TrailStore {
        &self.trails
    }

    pub fn trails_mut(&mut self) -> &mut TrailStore {
        &mut self.trails
    }

    /// Number of orbital updates applied so far.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// A detached copy of the orbital state, for off-thread computation.
    pub fn orbital_state(&self) -> OrbitalState {
        self.state.clone()
    }

    /// Advance every body by `dt` simulated seconds and record one trail
    /// point per tracked body.
    pub fn advance(&mut self, dt: f64) {
        self.state.advance(dt);
        for body in &self.state.bodies {
            self.trails.record(body.id, body.position);
        }
        self.update_count += 1;
    }

    /// Write externally computed poses. Unknown ids are skipped; each known
    /// body is written whole and gets one trail point. Returns how many poses
    /// were applied.
    pub fn apply_poses(&mut self, poses: &[BodyPose]) -> usize {
        let mut applied = 0;
        for pose in poses {
            let Some(body) = self.state.bodies.get_mut(pose.id.index()) else {
                continue;
            };
            if body.is_central() {
                continue;
            }
            body.angle = pose.angle;
            body.spin_angle = pose.spin_angle;
            body.position = pose.position;
            self.trails.record(pose.id, pose.position);
            applied += 1;
        }
        if applied > 0 {
            self.update_count += 1;
        }
        applied
    }

    /// Put one body back at `angle` and clear its trail, along with the trails
    /// of every satellite carried along with it.
    pub fn reset_body(&mut self, id: BodyId, angle: f64) -> Result<(), OrbitError> {
        let body = self
            .state
            .bodies
            .get_mut(id.index())
            .ok_or_else(|| OrbitError::UnknownBody(id.to_string()))?;
        check_finite(&body.name, "angle", angle)?;
        if !body.is_central() {
            body.angle = angle;
        }
        resolve_positions(&mut self.state.bodies);
        for moved in self.carried_by(id) {
            self.trails.clear(moved);
        }
        Ok(())
    }

    /// `id` and its satellites at any depth. Parents precede children in the
    /// arena, so one forward pass finds them all.
    fn carried_by(&self, id: BodyId) -> Vec<BodyId> {
        let mut moved = vec![id];
        for body in &self.state.bodies[id.index() + 1..] {
            if let Some(parent) = body.orbit.parent()
                && moved.contains(&parent)
            {
                moved.push(body.id);
            }
        }
        moved
    }

    /// Re-draw every starting angle and clear all trails.
    pub fn reset_angles(&mut self, seeding: InitialAngles) -> Result<(), OrbitError> {
        if let InitialAngles::Fixed(angle) = seeding {
            check_finite("*", "initial_angles", angle)?;
        }
        let drawn = draw_angles(self.state.bodies.len(), seeding);
        for (body, angle) in self.state.bodies.iter_mut().zip(drawn) {
            if !body.is_central() {
                body.angle = angle;
            }
        }
        resolve_positions(&mut self.state.bodies);
        self.trails.clear_all();
        Ok(())
    }
}
