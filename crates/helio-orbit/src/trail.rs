//! Bounded position history per body.
//!
//! Recording is always on; the `visible` flag only gates drawing, so turning
//! trails back on shows an up-to-date path immediately.

use std::collections::VecDeque;

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::body::BodyId;
use crate::error::OrbitError;

/// A sliding window of the most recent positions, oldest first.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    points: VecDeque<DVec3>,
    capacity: usize,
}

impl TrailBuffer {
    /// Create an empty trail holding at most `capacity` points.
    pub fn new(capacity: usize) -> Result<Self, OrbitError> {
        if capacity == 0 {
            return Err(OrbitError::InvalidTrailCapacity);
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a point, evicting the oldest once the window is full.
    pub fn record(&mut self, position: DVec3) {
        self.points.push_back(position);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Drop all points but keep the allocation.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<DVec3> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<DVec3> {
        self.points.back().copied()
    }

    /// Points in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().copied()
    }

    /// Interleaved `xyz` vertex data for a line strip, padded to `capacity`
    /// with the newest point so the vertex buffer size never changes.
    pub fn to_line_vertices(&self) -> Vec<f32> {
        let mut vertices = Vec::with_capacity(self.capacity * 3);
        for p in &self.points {
            vertices.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }
        let pad = self.newest().unwrap_or(DVec3::ZERO);
        for _ in self.points.len()..self.capacity {
            vertices.extend_from_slice(&[pad.x as f32, pad.y as f32, pad.z as f32]);
        }
        vertices
    }
}

/// Trails for every tracked body plus the shared display flag.
#[derive(Clone, Debug)]
pub struct TrailStore {
    buffers: FxHashMap<BodyId, TrailBuffer>,
    capacity: usize,
    visible: bool,
}

impl TrailStore {
    pub fn new(capacity: usize, visible: bool) -> Result<Self, OrbitError> {
        if capacity == 0 {
            return Err(OrbitError::InvalidTrailCapacity);
        }
        Ok(Self {
            buffers: FxHashMap::default(),
            capacity,
            visible,
        })
    }

    /// Start tracking a body. Tracking an already-tracked body is a no-op.
    pub fn track(&mut self, id: BodyId) {
        let capacity = self.capacity;
        self.buffers.entry(id).or_insert_with(|| TrailBuffer {
            points: VecDeque::with_capacity(capacity),
            capacity,
        });
    }

    pub fn is_tracked(&self, id: BodyId) -> bool {
        self.buffers.contains_key(&id)
    }

    /// Record a point for `id`. Untracked bodies are ignored.
    pub fn record(&mut self, id: BodyId, position: DVec3) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.record(position);
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&TrailBuffer> {
        self.buffers.get(&id)
    }

    pub fn clear(&mut self, id: BodyId) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.clear();
        }
    }

    pub fn clear_all(&mut self) {
        for buffer in self.buffers.values_mut() {
            buffer.clear();
        }
    }

    /// Flip display on/off and return the new state. Recording is unaffected.
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tracked bodies.
    pub fn tracked_count(&self) -> usize {
        self.buffers.len()
    }

    /// Sum of recorded points across all trails.
    pub fn total_points(&self) -> usize {
        self.buffers.values().map(TrailBuffer::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &TrailBuffer)> {
        self.buffers.iter().map(|(id, buffer)| (*id, buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(i: usize) -> DVec3 {
        DVec3::new(i as f64, 0.0, -(i as f64))
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            TrailBuffer::new(0).unwrap_err(),
            OrbitError::InvalidTrailCapacity
        );
        assert!(TrailStore::new(0, true).is_err());
    }

    #[test]
    fn test_window_slides_fifo() {
        let n = 500;
        let m = 1234;
        let mut trail = TrailBuffer::new(n).unwrap();
        for tick in 1..=m {
            trail.record(point(tick));
            assert!(trail.len() <= n);
        }
        assert_eq!(trail.len(), n);
        assert_eq!(trail.oldest(), Some(point(m - n + 1)));
        assert_eq!(trail.newest(), Some(point(m)));

        let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]), "chronological order");
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut trail = TrailBuffer::new(4).unwrap();
        for i in 0..4 {
            trail.record(point(i));
        }
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.capacity(), 4);
        trail.record(point(9));
        assert_eq!(trail.oldest(), Some(point(9)));
    }

    #[test]
    fn test_line_vertices_padded_with_newest() {
        let mut trail = TrailBuffer::new(3).unwrap();
        trail.record(DVec3::new(1.0, 2.0, 3.0));
        let v = trail.to_line_vertices();
        assert_eq!(v.len(), 9);
        assert_eq!(&v[6..9], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_hidden_trails_keep_recording() {
        let mut store = TrailStore::new(10, true).unwrap();
        let id = BodyId(3);
        store.track(id);
        assert!(!store.toggle_visible());
        store.record(id, point(1));
        store.record(id, point(2));
        assert_eq!(store.get(id).unwrap().len(), 2);
        assert!(store.toggle_visible());
        assert_eq!(store.total_points(), 2);
    }

    #[test]
    fn test_untracked_body_is_ignored() {
        let mut store = TrailStore::new(10, true).unwrap();
        store.record(BodyId(1), point(1));
        assert!(store.get(BodyId(1)).is_none());
        assert_eq!(store.total_points(), 0);
    }
}
