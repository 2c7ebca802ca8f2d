//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Orbit integration and time-scale settings.
    pub simulation: SimulationConfig,
    /// Orbit trail settings.
    pub trails: TrailConfig,
    /// Level-of-detail settings.
    pub lod: LodConfig,
    /// Camera and fly-to settings.
    pub camera: CameraConfig,
    /// Background position worker settings.
    pub worker: WorkerConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// How each body's starting orbital angle is chosen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum InitialAngles {
    /// Fresh entropy on every run.
    #[default]
    Random,
    /// Reproducible pseudo-random angles from the given seed.
    Seeded(u64),
    /// Every body starts at the same angle (radians).
    Fixed(f64),
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Time-scale multiplier applied to real elapsed time.
    pub time_speed: f64,
    /// Start with orbital motion frozen.
    pub start_paused: bool,
    /// Scale constant reconciling distance units with angular speed units.
    pub orbit_scale: f64,
    /// Self-rotation rate of planets, radians per simulated second.
    pub spin_rate: f64,
    /// Self-rotation rate of moons, radians per simulated second.
    pub satellite_spin_rate: f64,
    /// Starting orbital angle policy.
    pub initial_angles: InitialAngles,
    /// Load Ceres, Pluto, Eris, Makemake and Haumea.
    pub include_dwarf_planets: bool,
    /// Load the major moons.
    pub include_moons: bool,
}

/// Trail configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    /// Maximum number of recorded points per body.
    pub max_points: usize,
    /// Whether trails are drawn at startup.
    pub visible: bool,
    /// Record trails for moons as well as heliocentric bodies.
    pub track_satellites: bool,
}

/// Level-of-detail configuration. Distances are in scene units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Seconds of real time between reclassification passes.
    pub update_interval: f64,
    /// Distance beyond which a body drops to the medium tier.
    pub medium_distance: f64,
    /// Distance beyond which a body drops to the low tier.
    pub low_distance: f64,
    /// Distance beyond which a body drops to the ultra-low tier.
    pub ultra_low_distance: f64,
    /// Distance beyond which a body is hidden entirely.
    pub max_visible_distance: f64,
    /// Dead band around each threshold (0 = switch exactly at the threshold).
    pub hysteresis: f64,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Duration of fly-to transitions in seconds.
    pub transition_duration: f64,
    /// Camera position used at startup and on view reset.
    pub home_position: [f64; 3],
    /// Look-at point used at startup and on view reset.
    pub home_target: [f64; 3],
    /// Fly-to stand-off distance as a multiple of the body radius.
    pub fly_to_radius_factor: f64,
}

/// Background worker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkerConfig {
    /// Compute orbital positions on a background thread.
    pub offload: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Seconds between analytics log lines.
    pub metrics_interval: f64,
}

// --- Default implementations ---

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_speed: 1.0,
            start_paused: false,
            orbit_scale: 0.1,
            spin_rate: 0.5,
            satellite_spin_rate: 1.0,
            initial_angles: InitialAngles::Random,
            include_dwarf_planets: true,
            include_moons: true,
        }
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_points: 500,
            visible: true,
            track_satellites: false,
        }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            update_interval: 0.1,
            medium_distance: 1000.0,
            low_distance: 2500.0,
            ultra_low_distance: 5000.0,
            max_visible_distance: 8000.0,
            hysteresis: 0.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            transition_duration: 2.0,
            home_position: [0.0, 500.0, 1000.0],
            home_target: [0.0, 0.0, 0.0],
            fly_to_radius_factor: 4.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_interval: 1.0,
        }
    }
}

// --- Load / Save / Reload ---

const CONFIG_FILE: &str = "config.ron";

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("max_points: 500"));
        assert!(ron_str.contains("max_visible_distance: 8000.0"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.simulation.initial_angles = InitialAngles::Seeded(42);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(simulation: (time_speed: 4.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.simulation.time_speed, 4.0);
        assert_eq!(config.simulation.orbit_scale, 0.1);
        assert_eq!(config.lod, LodConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_seeded_angles_parse() {
        let config: Config =
            ron::from_str("(simulation: (initial_angles: Seeded(7)))").unwrap();
        assert_eq!(config.simulation.initial_angles, InitialAngles::Seeded(7));

        let config: Config = ron::from_str("(simulation: (initial_angles: Fixed(0.0)))").unwrap();
        assert_eq!(config.simulation.initial_angles, InitialAngles::Fixed(0.0));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.trails.max_points = 64;
        config.lod.hysteresis = 25.0;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.simulation.time_speed = 10.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().simulation.time_speed, 10.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
