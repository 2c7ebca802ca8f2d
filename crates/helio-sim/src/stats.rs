//! Frame rate and update counters.

/// Counts frames and recomputes FPS once per elapsed real second.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    total_frames: u64,
    window_frames: u32,
    window_elapsed: f64,
    fps: f64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of `real_dt` seconds. Returns the new FPS when the
    /// one-second window closes.
    pub fn record_frame(&mut self, real_dt: f64) -> Option<f64> {
        self.total_frames += 1;
        self.window_frames += 1;
        self.window_elapsed += real_dt.max(0.0);
        if self.window_elapsed < 1.0 {
            return None;
        }
        self.fps = (self.window_frames as f64 / self.window_elapsed).round();
        self.window_frames = 0;
        self.window_elapsed = 0.0;
        Some(self.fps)
    }

    /// FPS measured over the last completed window, 0 before the first.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}
