use helio_config::ConfigError;
use helio_sim::{SimError, SnapshotError};

use crate::platform::PlatformError;

/// Anything that can stop the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("invalid frame rate {0}: must be at least 1")]
    InvalidFps(u32),

    #[error("invalid run duration {0}: must be finite and non-negative")]
    InvalidDuration(f64),
}
