//! Throttled per-body LOD classification.
//!
//! The classifier accumulates real time and only reclassifies once the
//! configured interval has elapsed. Tier and visibility changes are queued as
//! [`LodEvent`]s for the rendering layer to drain.

use std::hash::Hash;

use glam::DVec3;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::LodError;
use crate::metrics::LodMetrics;
use crate::selector::{LodSelector, LodTier};

/// Classification result for one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodState {
    pub tier: LodTier,
    /// Camera distance at the last reclassification pass.
    pub distance: f64,
    /// False once the body is beyond draw distance.
    pub visible: bool,
}

impl Default for LodState {
    fn default() -> Self {
        Self {
            tier: LodTier::High,
            distance: 0.0,
            visible: true,
        }
    }
}

/// A change the rendering layer should react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LodEvent<K> {
    TierChanged { id: K, old: LodTier, new: LodTier },
    VisibilityChanged { id: K, visible: bool },
}

/// Tracks the LOD state of every registered body.
pub struct LodClassifier<K> {
    selector: LodSelector,
    update_interval: f64,
    accumulator: f64,
    states: FxHashMap<K, LodState>,
    events: Vec<LodEvent<K>>,
    passes: u64,
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> LodClassifier<K> {
    /// `update_interval` is in seconds of real time; 0 reclassifies every call.
    pub fn new(selector: LodSelector, update_interval: f64) -> Result<Self, LodError> {
        if !update_interval.is_finite() || update_interval < 0.0 {
            return Err(LodError::InvalidInterval(update_interval));
        }
        Ok(Self {
            selector,
            update_interval,
            accumulator: 0.0,
            states: FxHashMap::default(),
            events: Vec::new(),
            passes: 0,
        })
    }

    /// Start managing a body. New bodies start at full detail and visible.
    pub fn register(&mut self, id: K) {
        self.states.entry(id).or_default();
    }

    /// Stop managing a body. Returns its last state.
    pub fn unregister(&mut self, id: K) -> Option<LodState> {
        self.states.remove(&id)
    }

    pub fn is_registered(&self, id: K) -> bool {
        self.states.contains_key(&id)
    }

    pub fn state(&self, id: K) -> Option<&LodState> {
        self.states.get(&id)
    }

    pub fn states(&self) -> impl Iterator<Item = (K, &LodState)> {
        self.states.iter().map(|(id, state)| (*id, state))
    }

    pub fn selector(&self) -> &LodSelector {
        &self.selector
    }

    /// Number of reclassification passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Accumulate `dt` seconds and reclassify if the interval has elapsed.
    /// Returns whether a pass ran.
    ///
    /// `position_of` resolves a body's world position; bodies it returns
    /// `None` for are skipped and keep their previous state.
    pub fn update(
        &mut self,
        dt: f64,
        camera: DVec3,
        position_of: impl FnMut(K) -> Option<DVec3>,
    ) -> bool {
        self.accumulator += dt;
        if self.accumulator < self.update_interval {
            return false;
        }
        self.accumulator = 0.0;
        self.reclassify(camera, position_of);
        true
    }

    /// Reclassify every registered body now, regardless of the interval.
    pub fn reclassify(&mut self, camera: DVec3, mut position_of: impl FnMut(K) -> Option<DVec3>) {
        for (&id, state) in self.states.iter_mut() {
            let Some(position) = position_of(id) else {
                continue;
            };
            let distance = camera.distance(position);
            state.distance = distance;

            let tier = self.selector.select_from(state.tier, distance);
            if tier != state.tier {
                debug!(body = ?id, from = ?state.tier, to = ?tier, distance, "LOD tier changed");
                self.events.push(LodEvent::TierChanged {
                    id,
                    old: state.tier,
                    new: tier,
                });
                state.tier = tier;
            }

            let visible = self.selector.visible_from(state.visible, distance);
            if visible != state.visible {
                debug!(body = ?id, visible, distance, "LOD visibility changed");
                self.events.push(LodEvent::VisibilityChanged { id, visible });
                state.visible = visible;
            }
        }
        self.passes += 1;
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<LodEvent<K>> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Aggregate counts for the analytics overlay.
    pub fn metrics(&self) -> LodMetrics {
        LodMetrics::collect(self.states.values())
    }

    /// Forget all bodies and queued events.
    pub fn clear(&mut self) {
        self.states.clear();
        self.events.clear();
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::LodThresholds;

    fn classifier(interval: f64) -> LodClassifier<u32> {
        LodClassifier::new(LodSelector::new(LodThresholds::default()), interval).unwrap()
    }

    fn at_x(x: f64) -> impl FnMut(u32) -> Option<DVec3> {
        move |_| Some(DVec3::new(x, 0.0, 0.0))
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let selector = LodSelector::new(LodThresholds::default());
        assert!(LodClassifier::<u32>::new(selector.clone(), -0.1).is_err());
        assert!(LodClassifier::<u32>::new(selector, f64::NAN).is_err());
    }

    #[test]
    fn test_throttled_to_interval() {
        let mut lod = classifier(0.1);
        lod.register(1);
        assert!(!lod.update(0.05, DVec3::ZERO, at_x(3000.0)));
        assert_eq!(lod.state(1).unwrap().tier, LodTier::High);
        assert!(lod.update(0.05, DVec3::ZERO, at_x(3000.0)));
        assert_eq!(lod.state(1).unwrap().tier, LodTier::Low);
        // Accumulator reset: the next small step does not run a pass.
        assert!(!lod.update(0.01, DVec3::ZERO, at_x(100.0)));
        assert_eq!(lod.passes(), 1);
    }

    #[test]
    fn test_events_emitted_on_change_only() {
        let mut lod = classifier(0.0);
        lod.register(7);
        lod.update(0.016, DVec3::ZERO, at_x(1500.0));
        assert_eq!(
            lod.drain_events(),
            vec![LodEvent::TierChanged {
                id: 7,
                old: LodTier::High,
                new: LodTier::Medium
            }]
        );
        lod.update(0.016, DVec3::ZERO, at_x(1600.0));
        assert!(lod.drain_events().is_empty());
    }

    #[test]
    fn test_hidden_beyond_max_distance_and_back() {
        let mut lod = classifier(0.0);
        lod.register(2);
        lod.update(0.016, DVec3::ZERO, at_x(9000.0));
        let events = lod.drain_events();
        assert!(events.contains(&LodEvent::VisibilityChanged {
            id: 2,
            visible: false
        }));
        assert!(!lod.state(2).unwrap().visible);
        assert_eq!(lod.state(2).unwrap().tier, LodTier::UltraLow);

        lod.update(0.016, DVec3::ZERO, at_x(500.0));
        let state = lod.state(2).unwrap();
        assert!(state.visible);
        assert_eq!(state.tier, LodTier::High);
    }

    #[test]
    fn test_unresolved_bodies_are_skipped() {
        let mut lod = classifier(0.0);
        lod.register(1);
        lod.update(0.016, DVec3::ZERO, |_| None);
        assert_eq!(lod.state(1), Some(&LodState::default()));
        assert!(lod.drain_events().is_empty());
    }

    #[test]
    fn test_unregistered_bodies_are_not_classified() {
        let mut lod = classifier(0.0);
        let mut asked = Vec::new();
        lod.register(1);
        lod.update(0.016, DVec3::ZERO, |id| {
            asked.push(id);
            Some(DVec3::ZERO)
        });
        assert_eq!(asked, vec![1]);
        assert!(lod.state(2).is_none());
    }

    #[test]
    fn test_flicker_at_threshold_without_hysteresis() {
        let mut lod = classifier(0.0);
        lod.register(1);
        let mut changes = 0;
        for i in 0..10 {
            let x = if i % 2 == 0 { 1000.5 } else { 999.5 };
            lod.update(0.1, DVec3::ZERO, at_x(x));
            changes += lod.drain_events().len();
        }
        assert_eq!(changes, 10);
    }

    #[test]
    fn test_hysteresis_suppresses_flicker() {
        let selector = LodSelector::new(LodThresholds::default())
            .with_hysteresis(10.0)
            .unwrap();
        let mut lod = LodClassifier::new(selector, 0.0).unwrap();
        lod.register(1);
        for i in 0..10 {
            let x = if i % 2 == 0 { 1000.5 } else { 999.5 };
            lod.update(0.1, DVec3::ZERO, at_x(x));
        }
        assert!(lod.drain_events().is_empty());
    }
}
