//! Configuration system for the Helio solar-system simulator.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, InitialAngles, LodConfig, SimulationConfig, TrailConfig,
    WorkerConfig,
};
pub use error::ConfigError;
