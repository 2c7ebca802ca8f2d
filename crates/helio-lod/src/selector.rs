//! Distance-based LOD selection with configurable thresholds and optional hysteresis.

use serde::{Deserialize, Serialize};

use crate::error::LodError;

/// Detail tiers, finest first. Ordering follows detail: `High < UltraLow`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LodTier {
    High,
    Medium,
    Low,
    UltraLow,
}

impl LodTier {
    pub const ALL: [LodTier; 4] = [
        LodTier::High,
        LodTier::Medium,
        LodTier::Low,
        LodTier::UltraLow,
    ];

    /// Sphere segment count the renderer should use for this tier.
    /// High = 128, Medium = 64, Low = 32, UltraLow = 16.
    pub fn sphere_segments(self) -> u32 {
        128 >> self as u32
    }

    /// Texture edge length in pixels for this tier.
    pub fn texture_size(self) -> u32 {
        2048 >> self as u32
    }
}

/// Tier boundaries in scene units.
///
/// A body strictly farther than `medium` drops to [`LodTier::Medium`], and so
/// on; anything strictly farther than `max_visible` is hidden regardless of tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodThresholds {
    medium: f64,
    low: f64,
    ultra_low: f64,
    max_visible: f64,
}

impl LodThresholds {
    /// Default boundaries: 1000, 2500, 5000, hidden beyond 8000.
    pub fn default_solar_system() -> Self {
        Self {
            medium: 1000.0,
            low: 2500.0,
            ultra_low: 5000.0,
            max_visible: 8000.0,
        }
    }

    /// Custom boundaries. They must be finite, positive, and strictly
    /// increasing, and `max_visible` must lie beyond `ultra_low`.
    pub fn custom(medium: f64, low: f64, ultra_low: f64, max_visible: f64) -> Result<Self, LodError> {
        let all = [medium, low, ultra_low, max_visible];
        if all.iter().any(|t| !t.is_finite()) {
            return Err(LodError::InvalidThresholds("thresholds must be finite"));
        }
        if medium <= 0.0 {
            return Err(LodError::InvalidThresholds("thresholds must be positive"));
        }
        if !(medium < low && low < ultra_low) {
            return Err(LodError::InvalidThresholds(
                "thresholds must be strictly increasing",
            ));
        }
        if max_visible <= ultra_low {
            return Err(LodError::InvalidThresholds(
                "max visible distance must exceed the ultra-low threshold",
            ));
        }
        Ok(Self {
            medium,
            low,
            ultra_low,
            max_visible,
        })
    }

    /// Lower boundary (exclusive) of a tier. `High` starts at 0.
    pub fn start_of(&self, tier: LodTier) -> f64 {
        match tier {
            LodTier::High => 0.0,
            LodTier::Medium => self.medium,
            LodTier::Low => self.low,
            LodTier::UltraLow => self.ultra_low,
        }
    }

    pub fn max_visible(&self) -> f64 {
        self.max_visible
    }

    /// Narrowest span between consecutive boundaries, counting from 0.
    pub fn smallest_gap(&self) -> f64 {
        [
            self.medium,
            self.low - self.medium,
            self.ultra_low - self.low,
            self.max_visible - self.ultra_low,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self::default_solar_system()
    }
}

/// Selects LOD tiers and visibility from camera distance.
#[derive(Clone, Debug)]
pub struct LodSelector {
    thresholds: LodThresholds,
    hysteresis: f64,
}

impl LodSelector {
    /// A selector with no hysteresis: tiers switch exactly at the thresholds.
    pub fn new(thresholds: LodThresholds) -> Self {
        Self {
            thresholds,
            hysteresis: 0.0,
        }
    }

    /// Add a dead band of `band` units around every boundary. A body must
    /// cross a boundary by more than `band` before its tier or visibility
    /// changes, which stops flicker when it hovers at a threshold.
    ///
    /// The band must stay under half the narrowest tier so that bands around
    /// neighbouring boundaries never overlap.
    pub fn with_hysteresis(mut self, band: f64) -> Result<Self, LodError> {
        if !band.is_finite() || band < 0.0 || band >= self.thresholds.smallest_gap() / 2.0 {
            return Err(LodError::InvalidHysteresis(band));
        }
        self.hysteresis = band;
        Ok(self)
    }

    /// Tier for a distance, ignoring history.
    pub fn select_tier(&self, distance: f64) -> LodTier {
        debug_assert!(distance >= 0.0, "distance must be non-negative");
        let t = &self.thresholds;
        if distance > t.ultra_low {
            LodTier::UltraLow
        } else if distance > t.low {
            LodTier::Low
        } else if distance > t.medium {
            LodTier::Medium
        } else {
            LodTier::High
        }
    }

    /// Tier for a distance given the body's current tier.
    pub fn select_from(&self, current: LodTier, distance: f64) -> LodTier {
        let raw = self.select_tier(distance);
        if self.hysteresis == 0.0 || raw == current {
            return raw;
        }
        let nearest = self.select_tier((distance - self.hysteresis).max(0.0));
        let farthest = self.select_tier(distance + self.hysteresis);
        if nearest <= current && current <= farthest {
            current
        } else {
            raw
        }
    }

    /// Whether a body at `distance` is within draw distance, ignoring history.
    pub fn is_visible(&self, distance: f64) -> bool {
        distance <= self.thresholds.max_visible
    }

    /// Visibility given the body's current visibility.
    pub fn visible_from(&self, currently_visible: bool, distance: f64) -> bool {
        let max = self.thresholds.max_visible;
        if currently_visible {
            distance <= max + self.hysteresis
        } else {
            distance <= max - self.hysteresis
        }
    }

    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    pub fn hysteresis(&self) -> f64 {
        self.hysteresis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_selector() -> LodSelector {
        LodSelector::new(LodThresholds::default_solar_system())
    }

    #[test]
    fn test_zero_distance_is_high() {
        assert_eq!(default_selector().select_tier(0.0), LodTier::High);
    }

    /// Boundaries are exclusive: a body exactly at a threshold keeps the finer tier.
    #[test]
    fn test_threshold_boundary_behavior() {
        let s = default_selector();
        assert_eq!(s.select_tier(999.0), LodTier::High);
        assert_eq!(s.select_tier(1000.0), LodTier::High);
        assert_eq!(s.select_tier(1001.0), LodTier::Medium);
        assert_eq!(s.select_tier(2499.0), LodTier::Medium);
        assert_eq!(s.select_tier(2500.0), LodTier::Medium);
        assert_eq!(s.select_tier(2501.0), LodTier::Low);
        assert_eq!(s.select_tier(4999.0), LodTier::Low);
        assert_eq!(s.select_tier(5000.0), LodTier::Low);
        assert_eq!(s.select_tier(5001.0), LodTier::UltraLow);
    }

    #[test]
    fn test_visibility_boundary() {
        let s = default_selector();
        assert!(s.is_visible(7999.0));
        assert!(s.is_visible(8000.0));
        assert!(!s.is_visible(8001.0));
        assert_eq!(s.select_tier(8001.0), LodTier::UltraLow);
    }

    #[test]
    fn test_monotonically_increasing_with_distance() {
        let s = default_selector();
        let mut prev = LodTier::High;
        for d in [0.0, 500.0, 1000.5, 2000.0, 2600.0, 4000.0, 6000.0, 1e9] {
            let tier = s.select_tier(d);
            assert!(tier >= prev, "tier must not get finer with distance: d={d}");
            prev = tier;
        }
    }

    #[test]
    fn test_hysteresis_band_limited_by_tier_gap() {
        let thresholds = LodThresholds::default_solar_system();
        assert_eq!(thresholds.smallest_gap(), 1000.0);
        assert!(LodSelector::new(thresholds).with_hysteresis(499.0).is_ok());
        assert_eq!(
            LodSelector::new(thresholds).with_hysteresis(500.0).unwrap_err(),
            LodError::InvalidHysteresis(500.0)
        );
        assert!(LodSelector::new(thresholds).with_hysteresis(2000.0).is_err());
        assert!(LodSelector::new(thresholds).with_hysteresis(-1.0).is_err());
    }

    #[test]
    fn test_wide_band_cannot_hold_a_tier_two_steps_away() {
        let s = default_selector().with_hysteresis(400.0).unwrap();
        assert_eq!(s.select_from(LodTier::High, 2600.0), LodTier::Low);
    }

    #[test]
    fn test_custom_thresholds_validated() {
        assert!(LodThresholds::custom(100.0, 200.0, 400.0, 800.0).is_ok());
        assert!(LodThresholds::custom(100.0, 50.0, 400.0, 800.0).is_err());
        assert!(LodThresholds::custom(0.0, 50.0, 400.0, 800.0).is_err());
        assert!(LodThresholds::custom(100.0, 200.0, 400.0, 300.0).is_err());
        assert!(LodThresholds::custom(100.0, 200.0, f64::NAN, 800.0).is_err());
    }

    #[test]
    fn test_no_hysteresis_flips_at_boundary() {
        let s = default_selector();
        assert_eq!(s.select_from(LodTier::High, 1000.1), LodTier::Medium);
        assert_eq!(s.select_from(LodTier::Medium, 999.9), LodTier::High);
    }

    #[test]
    fn test_hysteresis_holds_tier_inside_band() {
        let s = default_selector().with_hysteresis(50.0).unwrap();
        assert_eq!(s.select_from(LodTier::High, 1020.0), LodTier::High);
        assert_eq!(s.select_from(LodTier::High, 1051.0), LodTier::Medium);
        assert_eq!(s.select_from(LodTier::Medium, 980.0), LodTier::Medium);
        assert_eq!(s.select_from(LodTier::Medium, 949.0), LodTier::High);
        // A large jump still lands on the correct tier.
        assert_eq!(s.select_from(LodTier::High, 6000.0), LodTier::UltraLow);
    }

    #[test]
    fn test_hysteresis_on_visibility() {
        let s = default_selector().with_hysteresis(100.0).unwrap();
        assert!(s.visible_from(true, 8050.0));
        assert!(!s.visible_from(true, 8101.0));
        assert!(!s.visible_from(false, 7950.0));
        assert!(s.visible_from(false, 7899.0));
    }

    #[test]
    fn test_negative_hysteresis_rejected() {
        assert!(default_selector().with_hysteresis(-1.0).is_err());
    }

    #[test]
    fn test_detail_per_tier() {
        assert_eq!(LodTier::High.sphere_segments(), 128);
        assert_eq!(LodTier::UltraLow.sphere_segments(), 16);
        assert_eq!(LodTier::Medium.texture_size(), 1024);
        assert_eq!(LodTier::Low.texture_size(), 512);
    }
}
