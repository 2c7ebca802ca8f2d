//! A single eased transition between two camera states.
//!
//! Progress is driven by real time and is independent of the simulation's
//! time scale or pause state.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::error::CameraError;

/// Accumulated `dt / duration` steps land within this of 1.0 when they
/// should complete exactly.
const COMPLETION_EPSILON: f64 = 1e-9;

/// Camera eye position and look-at point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: DVec3,
    pub target: DVec3,
}

impl CameraState {
    pub fn new(position: DVec3, target: DVec3) -> Self {
        Self { position, target }
    }

    /// Interpolate position and target with the same factor.
    pub fn lerp(&self, other: &CameraState, t: f64) -> CameraState {
        CameraState {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 500.0, 1000.0),
            target: DVec3::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraTransition {
    start: CameraState,
    end: CameraState,
    /// Linear progress in `[0, 1]`.
    progress: f64,
    /// Seconds of real time.
    duration: f64,
    easing: EasingFunction,
    active: bool,
}

impl CameraTransition {
    /// A transition from `start` to `end`. A zero duration yields a
    /// transition that is already complete.
    pub fn new(
        start: CameraState,
        end: CameraState,
        duration: f64,
        easing: EasingFunction,
    ) -> Result<Self, CameraError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(CameraError::InvalidDuration(duration));
        }
        let instant = duration == 0.0;
        Ok(Self {
            start,
            end,
            progress: if instant { 1.0 } else { 0.0 },
            duration,
            easing,
            active: !instant,
        })
    }

    /// Advance by `dt` seconds of real time and return the camera state at
    /// the new progress. Inactive transitions return the end state unchanged.
    pub fn advance(&mut self, dt: f64) -> CameraState {
        if !self.active {
            return self.current();
        }
        self.progress += dt.max(0.0) / self.duration;
        if self.progress >= 1.0 - COMPLETION_EPSILON {
            self.progress = 1.0;
            self.active = false;
        }
        self.current()
    }

    /// Camera state at the current progress.
    pub fn current(&self) -> CameraState {
        if self.progress >= 1.0 {
            return self.end;
        }
        self.start.lerp(&self.end, self.easing.apply(self.progress))
    }

    pub fn start(&self) -> &CameraState {
        &self.start
    }

    pub fn end(&self) -> &CameraState {
        &self.end
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop without reaching the end state.
    pub fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_a() -> CameraState {
        CameraState::new(DVec3::ZERO, DVec3::ZERO)
    }

    fn state_b() -> CameraState {
        CameraState::new(DVec3::new(1000.0, 2000.0, 3000.0), DVec3::new(10.0, 0.0, -10.0))
    }

    #[test]
    fn test_transition_starts_at_old_camera_state() {
        let transition =
            CameraTransition::new(state_a(), state_b(), 2.0, EasingFunction::Linear).unwrap();
        assert_eq!(transition.current(), state_a());
        assert!(transition.is_active());
        assert_eq!(transition.progress(), 0.0);
    }

    #[test]
    fn test_linear_midpoint() {
        let mut transition =
            CameraTransition::new(state_a(), state_b(), 2.0, EasingFunction::Linear).unwrap();
        let mid = transition.advance(1.0);
        assert!((mid.position - DVec3::new(500.0, 1000.0, 1500.0)).length() < 1e-9);
        assert!((mid.target - DVec3::new(5.0, 0.0, -5.0)).length() < 1e-9);
    }

    #[test]
    fn test_twenty_steps_complete_exactly() {
        let mut transition =
            CameraTransition::new(state_a(), state_b(), 2.0, EasingFunction::EaseInOutCubic)
                .unwrap();
        let mut last = state_a();
        for _ in 0..20 {
            last = transition.advance(0.1);
        }
        assert_eq!(transition.progress(), 1.0);
        assert!(!transition.is_active());
        assert_eq!(last, state_b());
    }

    #[test]
    fn test_progress_is_monotonic_and_clamped() {
        let mut transition =
            CameraTransition::new(state_a(), state_b(), 1.0, EasingFunction::default()).unwrap();
        let mut prev = 0.0;
        for _ in 0..30 {
            transition.advance(0.07);
            assert!(transition.progress() >= prev);
            assert!(transition.progress() <= 1.0);
            prev = transition.progress();
        }
        assert!(!transition.is_active());
    }

    #[test]
    fn test_zero_duration_completes_instantly() {
        let transition =
            CameraTransition::new(state_a(), state_b(), 0.0, EasingFunction::default()).unwrap();
        assert!(!transition.is_active());
        assert_eq!(transition.progress(), 1.0);
        assert_eq!(transition.current(), state_b());
    }

    #[test]
    fn test_invalid_durations_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let result = CameraTransition::new(state_a(), state_b(), bad, EasingFunction::Linear);
            assert!(matches!(result, Err(CameraError::InvalidDuration(_))), "{bad}");
        }
    }

    #[test]
    fn test_inactive_transition_does_not_move() {
        let mut transition =
            CameraTransition::new(state_a(), state_b(), 1.0, EasingFunction::Linear).unwrap();
        transition.advance(0.25);
        transition.cancel();
        let frozen = transition.progress();
        transition.advance(0.5);
        assert_eq!(transition.progress(), frozen);
    }

    #[test]
    fn test_camera_state_ron_round_trip() {
        let state = state_b();
        let text = ron::to_string(&state).unwrap();
        let back: CameraState = ron::from_str(&text).unwrap();
        assert_eq!(back, state);
    }
}
