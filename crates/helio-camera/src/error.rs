use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("invalid transition duration {0}: must be finite and non-negative")]
    InvalidDuration(f64),
    #[error("invalid fly-to distance factor {0}")]
    InvalidDistanceFactor(f64),
}
