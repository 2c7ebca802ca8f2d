//! Calendar time shown alongside the simulation.

use chrono::{DateTime, TimeDelta, Utc};

/// One real second at time speed 1 is one simulated hour.
pub const SIM_SECONDS_PER_SCALED_SECOND: f64 = 3600.0;

/// Tracks the simulated calendar date. Only advanced while unpaused.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    epoch: DateTime<Utc>,
    date: DateTime<Utc>,
    /// Scaled seconds (real seconds times time speed) since `epoch`.
    scaled_elapsed: f64,
}

impl SimulationClock {
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            epoch,
            date: epoch,
            scaled_elapsed: 0.0,
        }
    }

    /// A clock starting at the current wall-clock time.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Advance by `scaled_dt` (real seconds already multiplied by time speed).
    pub fn advance(&mut self, scaled_dt: f64) {
        if scaled_dt <= 0.0 || !scaled_dt.is_finite() {
            return;
        }
        self.scaled_elapsed += scaled_dt;
        // Recompute from the epoch so millisecond rounding never accumulates.
        let millis = (self.scaled_elapsed * SIM_SECONDS_PER_SCALED_SECOND * 1000.0).round();
        if let Some(date) = TimeDelta::try_milliseconds(millis as i64)
            .and_then(|delta| self.epoch.checked_add_signed(delta))
        {
            self.date = date;
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Simulated seconds elapsed since the epoch.
    pub fn simulated_seconds(&self) -> f64 {
        self.scaled_elapsed * SIM_SECONDS_PER_SCALED_SECOND
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::starting_now()
    }
}
