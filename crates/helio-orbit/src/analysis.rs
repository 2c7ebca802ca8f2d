//! Planar orbital-analysis helpers for the educational overlays.
//!
//! These are visual approximations on the XZ plane, not restricted
//! three-body solutions.

use std::f64::consts::TAU;

use glam::DVec3;
use serde::Serialize;

use crate::body::CelestialBody;

/// Approximate Lagrange points of a two-body pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LagrangePoints {
    pub l1: DVec3,
    pub l2: DVec3,
    pub l3: DVec3,
    pub l4: DVec3,
    pub l5: DVec3,
}

/// Lagrange points of `secondary` orbiting `primary`.
///
/// L1 sits 30% of the way out, L2 10% beyond the secondary, L3 half a
/// separation behind the primary, and L4/L5 sit 60 degrees ahead and behind.
/// Returns `None` when the two positions coincide.
pub fn lagrange_points(primary: DVec3, secondary: DVec3) -> Option<LagrangePoints> {
    let delta = DVec3::new(secondary.x - primary.x, 0.0, secondary.z - primary.z);
    let distance = delta.length();
    if distance <= f64::EPSILON {
        return None;
    }
    let dir = delta / distance;
    let perp = DVec3::new(-dir.z, 0.0, dir.x);
    let flat = |p: DVec3| DVec3::new(p.x, 0.0, p.z);
    let p1 = flat(primary);
    let p2 = flat(secondary);

    let (sin60, cos60) = (0.866, 0.5);
    Some(LagrangePoints {
        l1: p1 + dir * distance * 0.3,
        l2: p2 + dir * distance * 0.1,
        l3: p1 - dir * distance * 0.5,
        l4: p1 + dir * distance * cos60 + perp * distance * sin60,
        l5: p1 + dir * distance * cos60 - perp * distance * sin60,
    })
}

/// Period ratio of two orbits and the nearest simple resonance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Resonance {
    /// `period_a / period_b`.
    pub ratio: f64,
    /// Closest simple ratio label, e.g. `"3:2"`.
    pub nearest: &'static str,
    /// Whether `ratio` lies within 0.1 of `nearest`.
    pub is_resonant: bool,
    pub period_a: f64,
    pub period_b: f64,
}

const SIMPLE_RATIOS: [(f64, &str); 5] = [
    (1.0 / 2.0, "2:1"),
    (2.0 / 3.0, "3:2"),
    (3.0 / 4.0, "4:3"),
    (1.0, "1:1"),
    (3.0 / 5.0, "5:3"),
];

/// Compare the orbital periods of two bodies, with `period = 2π·r / speed`.
/// Returns `None` if either body is central or does not move.
pub fn orbital_resonance(a: &CelestialBody, b: &CelestialBody) -> Option<Resonance> {
    let period = |body: &CelestialBody| {
        let speed = body.orbit().angular_speed();
        let radius = body.orbit().radius();
        (speed != 0.0 && radius > 0.0).then(|| (TAU * radius / speed).abs())
    };
    let period_a = period(a)?;
    let period_b = period(b)?;
    let ratio = period_a / period_b;

    let (nearest_ratio, nearest) = SIMPLE_RATIOS
        .iter()
        .copied()
        .min_by(|x, y| (ratio - x.0).abs().total_cmp(&(ratio - y.0).abs()))?;

    Some(Resonance {
        ratio,
        nearest,
        is_resonant: (ratio - nearest_ratio).abs() < 0.1,
        period_a,
        period_b,
    })
}
