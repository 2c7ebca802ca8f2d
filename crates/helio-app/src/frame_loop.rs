//! Real-time frame pacing for the headless loop.
//!
//! Each frame measures wall-clock time since the previous one and hands it
//! to the simulation unchanged, apart from a clamp on very long frames.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::AppError;

/// Maximum frame time clamp. A stalled frame (debugger, suspend) advances
/// the simulation by at most this much.
pub const MAX_FRAME_TIME: f64 = 0.25; // 250ms = 4 FPS minimum

/// Clamp a measured frame time to `[0, MAX_FRAME_TIME]`.
pub fn clamp_frame_time(frame_time: f64) -> f64 {
    if frame_time > MAX_FRAME_TIME {
        warn!(
            "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
            frame_time * 1000.0,
            MAX_FRAME_TIME * 1000.0
        );
        MAX_FRAME_TIME
    } else {
        frame_time.max(0.0)
    }
}

pub struct FrameLoop {
    frame_budget: Duration,
    started: Instant,
    previous: Instant,
    frame_count: u64,
}

impl FrameLoop {
    /// A loop paced to `fps` frames per second.
    pub fn new(fps: u32) -> Result<Self, AppError> {
        if fps == 0 {
            return Err(AppError::InvalidFps(fps));
        }
        let now = Instant::now();
        Ok(Self {
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(fps)),
            started: now,
            previous: now,
            frame_count: 0,
        })
    }

    /// Sleep out the rest of the frame budget, then return the clamped
    /// seconds since the previous frame.
    pub fn next_frame(&mut self) -> f64 {
        let deadline = self.previous + self.frame_budget;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous).as_secs_f64();
        self.previous = now;
        self.frame_count += 1;
        clamp_frame_time(frame_time)
    }

    /// Wall-clock seconds since the loop was created.
    pub fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_clamping() {
        assert_eq!(clamp_frame_time(1.0), MAX_FRAME_TIME);
        assert_eq!(clamp_frame_time(0.016), 0.016);
        assert_eq!(clamp_frame_time(-0.5), 0.0);
    }

    #[test]
    fn test_zero_fps_rejected() {
        assert!(matches!(FrameLoop::new(0), Err(AppError::InvalidFps(0))));
    }

    #[test]
    fn test_frames_are_paced() {
        let mut frames = FrameLoop::new(200).unwrap();
        let mut total = 0.0;
        for _ in 0..5 {
            let dt = frames.next_frame();
            assert!(dt >= 0.0 && dt <= MAX_FRAME_TIME);
            total += dt;
        }
        assert_eq!(frames.frame_count(), 5);
        // Five frames at 5ms each take at least 25ms.
        assert!(total >= 0.024, "total {total}");
        assert!(frames.elapsed() >= total - 1e-3);
    }
}
