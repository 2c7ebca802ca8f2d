//! Owns the camera and at most one in-flight transition.

use glam::DVec3;
use tracing::debug;

use crate::easing::EasingFunction;
use crate::error::CameraError;
use crate::transition::{CameraState, CameraTransition};

/// Camera Transition Controller.
///
/// A new `begin` replaces any in-flight transition and starts from wherever
/// the camera currently is, so re-targeting mid-flight never jumps.
#[derive(Clone, Debug)]
pub struct CameraController {
    camera: CameraState,
    transition: Option<CameraTransition>,
    default_duration: f64,
    easing: EasingFunction,
}

impl CameraController {
    pub fn new(camera: CameraState, default_duration: f64) -> Result<Self, CameraError> {
        if !default_duration.is_finite() || default_duration < 0.0 {
            return Err(CameraError::InvalidDuration(default_duration));
        }
        Ok(Self {
            camera,
            transition: None,
            default_duration,
            easing: EasingFunction::default(),
        })
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// The current or most recently finished transition.
    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.as_ref().is_some_and(CameraTransition::is_active)
    }

    pub fn default_duration(&self) -> f64 {
        self.default_duration
    }

    /// Start a transition from the current camera to `end` over `duration`
    /// seconds. A zero duration moves the camera immediately.
    pub fn begin(&mut self, end: CameraState, duration: f64) -> Result<(), CameraError> {
        let transition = CameraTransition::new(self.camera, end, duration, self.easing)?;
        if self.is_transitioning() {
            debug!("camera transition re-targeted mid-flight");
        }
        if !transition.is_active() {
            self.camera = end;
        }
        self.transition = Some(transition);
        Ok(())
    }

    /// [`begin`](Self::begin) with the configured default duration.
    pub fn fly_to(&mut self, position: DVec3, target: DVec3) -> Result<(), CameraError> {
        self.begin(CameraState::new(position, target), self.default_duration)
    }

    /// Fly to a viewpoint framing a body: offset `(d, d/2, d)` from its
    /// centre with `d = radius * factor`, looking at the body.
    pub fn fly_to_body(
        &mut self,
        body_position: DVec3,
        body_radius: f64,
        factor: f64,
    ) -> Result<(), CameraError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(CameraError::InvalidDistanceFactor(factor));
        }
        let d = body_radius * factor;
        let eye = body_position + DVec3::new(d, d * 0.5, d);
        self.fly_to(eye, body_position)
    }

    /// Fly back to `home`.
    pub fn reset_view(&mut self, home: CameraState) -> Result<(), CameraError> {
        self.begin(home, self.default_duration)
    }

    /// Advance the active transition by `dt` seconds of real time and write
    /// the interpolated camera. No-op when idle.
    pub fn advance(&mut self, dt: f64) {
        if let Some(transition) = self.transition.as_mut()
            && transition.is_active()
        {
            self.camera = transition.advance(dt);
        }
    }

    /// Place the camera directly, cancelling any transition.
    pub fn set_camera(&mut self, camera: CameraState) {
        if let Some(transition) = self.transition.as_mut() {
            transition.cancel();
        }
        self.camera = camera;
    }
}
