//! Position history trail
//!
//! Bounded newest-first log of a head's past positions. Followers reconstruct
//! a smooth path by sampling it at fixed offsets.

use std::collections::VecDeque;

use glam::Vec3;

use crate::consts::TRAIL_CAPACITY;

/// Ring buffer of past head positions (index 0 = newest)
#[derive(Debug, Clone)]
pub struct PositionTrail {
    entries: VecDeque<Vec3>,
    capacity: usize,
}

impl Default for PositionTrail {
    fn default() -> Self {
        Self::new(TRAIL_CAPACITY)
    }
}

impl PositionTrail {
    /// Create an empty trail. A capacity of 0 is bumped to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Prepend a position, evicting the oldest entry when full
    pub fn record(&mut self, pos: Vec3) {
        self.entries.push_front(pos);
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Sample at `index`, clamped to the oldest entry available.
    ///
    /// Returns `None` only when nothing has been recorded yet.
    pub fn sample(&self, index: usize) -> Option<Vec3> {
        let last = self.entries.len().checked_sub(1)?;
        self.entries.get(index.min(last)).copied()
    }

    /// Most recent position
    pub fn newest(&self) -> Option<Vec3> {
        self.entries.front().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Positions newest-first
    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.entries.iter()
    }
}
