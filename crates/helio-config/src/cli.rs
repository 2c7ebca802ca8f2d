//! Command-line argument parsing for the Helio simulator.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, InitialAngles};

/// Helio command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "helio", about = "Real-time solar system simulator")]
pub struct CliArgs {
    /// Time-scale multiplier (1.0 = real time, 0 = frozen).
    #[arg(long)]
    pub time_speed: Option<f64>,

    /// Start with orbital motion paused.
    #[arg(long)]
    pub paused: bool,

    /// Seed for reproducible starting orbital angles.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Compute orbital positions on a background thread.
    #[arg(long)]
    pub offload: bool,

    /// Run for this many seconds of wall-clock time, then exit.
    #[arg(long, default_value_t = 10.0)]
    pub duration: f64,

    /// Target frame rate of the headless loop.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Fly the camera to this body right after startup.
    #[arg(long)]
    pub focus: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(speed) = args.time_speed {
            self.simulation.time_speed = speed;
        }
        if args.paused {
            self.simulation.start_paused = true;
        }
        if let Some(seed) = args.seed {
            self.simulation.initial_angles = InitialAngles::Seeded(seed);
        }
        if args.offload {
            self.worker.offload = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            time_speed: Some(50.0),
            seed: Some(9),
            offload: true,
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.simulation.time_speed, 50.0);
        assert_eq!(config.simulation.initial_angles, InitialAngles::Seeded(9));
        assert!(config.worker.offload);
        // Non-overridden fields retain defaults
        assert!(!config.simulation.start_paused);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "helio",
            "--paused",
            "--focus",
            "saturn",
            "--duration",
            "2.5",
        ]);
        assert!(args.paused);
        assert_eq!(args.focus.as_deref(), Some("saturn"));
        assert_eq!(args.duration, 2.5);
        assert_eq!(args.fps, 60);
    }
}
