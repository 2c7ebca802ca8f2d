//! LOD configuration errors.

/// Rejected LOD settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LodError {
    /// Thresholds must be finite, positive, and strictly increasing, with the
    /// hide distance beyond the last tier boundary.
    #[error("invalid LOD thresholds: {0}")]
    InvalidThresholds(&'static str),

    /// The recompute interval must be finite and non-negative.
    #[error("LOD update interval must be finite and non-negative, got {0}")]
    InvalidInterval(f64),

    /// The hysteresis band must be non-negative and under half the narrowest
    /// tier gap.
    #[error("LOD hysteresis {0} must be non-negative and under half the narrowest tier gap")]
    InvalidHysteresis(f64),
}
