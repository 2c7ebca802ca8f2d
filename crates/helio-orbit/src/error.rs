//! Orbit configuration errors.

/// Errors raised while building or addressing the simulation world.
///
/// All of these are rejected before any body enters the simulation, so a
/// running world never carries NaN or infinite orbital state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    /// A non-central body was configured with a zero (or negative) orbit radius.
    #[error("body `{name}` has orbit distance {distance}; only the central body may sit at the origin")]
    ZeroDistance { name: String, distance: f64 },

    /// A parameter was NaN or infinite.
    #[error("body `{name}` has a non-finite `{field}`")]
    NonFiniteParameter { name: String, field: &'static str },

    /// Two bodies share a name.
    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    /// A second central body was added.
    #[error("body `{0}` cannot be central: the world already has a central body")]
    DuplicateCentral(String),

    /// A satellite names a parent that has not been added yet.
    #[error("satellite `{name}` references unknown parent `{parent}`")]
    UnknownParent { name: String, parent: String },

    /// Lookup of a body that does not exist.
    #[error("unknown body `{0}`")]
    UnknownBody(String),

    /// The orbit scale constant must be finite and positive.
    #[error("orbit scale must be finite and positive, got {0}")]
    InvalidOrbitScale(f64),

    /// Trails must hold at least one point.
    #[error("trail capacity must be at least 1")]
    InvalidTrailCapacity,
}
