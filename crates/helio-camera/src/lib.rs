//! Camera state and eased fly-to transitions.

mod controller;
mod easing;
mod error;
mod transition;

pub use controller::CameraController;
pub use easing::EasingFunction;
pub use error::CameraError;
pub use transition::{CameraState, CameraTransition};
