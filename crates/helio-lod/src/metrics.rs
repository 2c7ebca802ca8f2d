//! Aggregate LOD metrics for the analytics overlay.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classifier::LodState;
use crate::selector::LodTier;

/// Snapshot of classifier state. Read-only; nothing feeds back into LOD.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LodMetrics {
    pub total_objects: usize,
    pub visible_objects: usize,
    /// Mean camera distance over visible bodies, 0 when none are visible.
    pub average_distance: f64,
    /// Bodies per tier, hidden bodies included.
    pub tiers: BTreeMap<LodTier, usize>,
}

impl LodMetrics {
    pub(crate) fn collect<'a>(states: impl Iterator<Item = &'a LodState>) -> Self {
        let mut metrics = LodMetrics::default();
        let mut total_distance = 0.0;
        for state in states {
            metrics.total_objects += 1;
            if state.visible {
                metrics.visible_objects += 1;
                total_distance += state.distance;
            }
            *metrics.tiers.entry(state.tier).or_insert(0) += 1;
        }
        if metrics.visible_objects > 0 {
            metrics.average_distance = total_distance / metrics.visible_objects as f64;
        }
        metrics
    }

    pub fn count(&self, tier: LodTier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LodClassifier;
    use crate::selector::{LodSelector, LodThresholds};
    use glam::DVec3;

    #[test]
    fn test_empty_metrics() {
        let metrics = LodMetrics::collect(std::iter::empty());
        assert_eq!(metrics.total_objects, 0);
        assert_eq!(metrics.average_distance, 0.0);
    }

    #[test]
    fn test_metrics_from_classifier() {
        let mut lod =
            LodClassifier::new(LodSelector::new(LodThresholds::default()), 0.0).unwrap();
        let distances = [(1u32, 500.0), (2, 1500.0), (3, 3000.0), (4, 9000.0)];
        for (id, _) in distances {
            lod.register(id);
        }
        lod.update(0.1, DVec3::ZERO, |id| {
            distances
                .iter()
                .find(|(i, _)| *i == id)
                .map(|(_, d)| DVec3::new(*d, 0.0, 0.0))
        });

        let metrics = lod.metrics();
        assert_eq!(metrics.total_objects, 4);
        assert_eq!(metrics.visible_objects, 3);
        assert!((metrics.average_distance - (500.0 + 1500.0 + 3000.0) / 3.0).abs() < 1e-9);
        assert_eq!(metrics.count(LodTier::High), 1);
        assert_eq!(metrics.count(LodTier::Medium), 1);
        assert_eq!(metrics.count(LodTier::Low), 1);
        assert_eq!(metrics.count(LodTier::UltraLow), 1);
    }

    #[test]
    fn test_metrics_serialize_for_overlay() {
        let mut metrics = LodMetrics::default();
        metrics.total_objects = 2;
        metrics.tiers.insert(LodTier::High, 2);
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("\"total_objects\":2"));
        assert!(json.contains("\"High\":2"));
    }
}
