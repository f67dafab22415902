//! Segmented snake bodies
//!
//! The head is driven directly; every other segment chases a trail sample
//! `index * spacing` positions back, approaching it exponentially.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::trail::PositionTrail;
use crate::consts::*;
use crate::lerp3;

/// Number of body materials the renderer cycles through
pub const BODY_MATERIAL_COUNT: u8 = 10;

/// A single body part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySegment {
    pub pos: Vec3,
    /// Gradient material slot for rendering (opaque to the simulation)
    pub material: u8,
}

/// Head plus followers sharing one position trail
#[derive(Debug, Clone)]
pub struct SegmentedBody {
    /// Never empty: index 0 is the head
    segments: Vec<BodySegment>,
    trail: PositionTrail,
    /// Current normalized direction of travel
    heading: Vec3,
    spacing: usize,
    segment_size: f32,
}

impl SegmentedBody {
    /// Body of `length` parts laid out behind `head` along `heading`
    pub fn new(head: Vec3, heading: Vec3, length: usize) -> Self {
        let mut body = Self {
            segments: vec![BodySegment { pos: head, material: 0 }],
            trail: PositionTrail::new(TRAIL_CAPACITY),
            heading: heading.try_normalize().unwrap_or(Vec3::X),
            spacing: SEGMENT_SPACING,
            segment_size: SEGMENT_SIZE,
        };
        body.grow(length.saturating_sub(1));
        body
    }

    /// Override follower spacing (trail samples) and growth offset
    pub fn with_spacing(mut self, spacing: usize, segment_size: f32) -> Self {
        self.spacing = spacing.max(1);
        self.segment_size = segment_size;
        self
    }

    pub fn head(&self) -> Vec3 {
        self.segments[0].pos
    }

    pub fn tail(&self) -> Vec3 {
        self.segments[self.segments.len() - 1].pos
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a body keeps its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    /// Update the direction of travel. Zero vectors keep the old heading.
    pub fn set_heading(&mut self, heading: Vec3) {
        if let Some(h) = heading.try_normalize() {
            self.heading = h;
        }
    }

    pub fn segments(&self) -> &[BodySegment] {
        &self.segments
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.segments.iter().map(|s| s.pos)
    }

    pub fn trail(&self) -> &PositionTrail {
        &self.trail
    }

    /// Move the head and record it into the trail
    pub fn advance_head(&mut self, pos: Vec3) {
        self.segments[0].pos = pos;
        self.trail.record(pos);
    }

    /// Pull each follower toward its trail sample
    pub fn update_followers(&mut self) {
        for i in 1..self.segments.len() {
            let Some(target) = self.trail.sample(i * self.spacing) else {
                return;
            };
            let seg = &mut self.segments[i];
            seg.pos = lerp3(seg.pos, target, FOLLOW_LERP);
        }
    }

    /// Append `n` segments one segment-size behind the current tail
    pub fn grow(&mut self, n: usize) {
        for _ in 0..n {
            let pos = self.tail() - self.heading * self.segment_size;
            let material = ((self.segments.len() - 1) % BODY_MATERIAL_COUNT as usize) as u8;
            self.segments.push(BodySegment { pos, material });
        }
    }

    /// Back to a lone head at the origin with an empty trail, then regrow
    pub fn reset(&mut self, initial_length: usize) {
        self.segments.clear();
        self.segments.push(BodySegment {
            pos: Vec3::ZERO,
            material: 0,
        });
        self.trail.clear();
        self.grow(initial_length.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lays_out_behind_head() {
        let body = SegmentedBody::new(Vec3::ZERO, Vec3::X, 4);
        assert_eq!(body.len(), 4);
        assert_eq!(body.head(), Vec3::ZERO);
        assert!((body.tail() - Vec3::new(-3.0 * SEGMENT_SIZE, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_grow_uses_current_heading() {
        let mut body = SegmentedBody::new(Vec3::ZERO, Vec3::X, 1);
        body.set_heading(Vec3::new(0.0, 2.0, 0.0));
        body.grow(2);
        assert_eq!(body.len(), 3);
        assert!((body.tail() - Vec3::new(0.0, -2.0 * SEGMENT_SIZE, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_grow_zero_is_noop() {
        let mut body = SegmentedBody::new(Vec3::ZERO, Vec3::X, 3);
        body.grow(0);
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn test_zero_heading_ignored() {
        let mut body = SegmentedBody::new(Vec3::ZERO, Vec3::Z, 1);
        body.set_heading(Vec3::ZERO);
        assert_eq!(body.heading(), Vec3::Z);
    }

    #[test]
    fn test_followers_hold_with_empty_trail() {
        let mut body = SegmentedBody::new(Vec3::ZERO, Vec3::X, 3);
        let before: Vec<_> = body.positions().collect();
        body.update_followers();
        let after: Vec<_> = body.positions().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_followers_lerp_toward_sample() {
        let mut body = SegmentedBody::new(Vec3::ZERO, Vec3::X, 2);
        // Single entry: follower 1 samples index 12, clamped to index 0
        body.advance_head(Vec3::new(10.0, 0.0, 0.0));
        let start = body.segments()[1].pos;
        body.update_followers();
        let expected = lerp3(start, Vec3::new(10.0, 0.0, 0.0), FOLLOW_LERP);
        assert!((body.segments()[1].pos - expected).length() < 1e-5);
    }

    #[test]
    fn test_follower_samples_spaced_index() {
        let mut body = SegmentedBody::new(Vec3::ZERO, Vec3::X, 3).with_spacing(2, 1.0);
        for i in 0..10 {
            body.advance_head(Vec3::new(i as f32, 0.0, 0.0));
        }
        // Follower 2 targets trail[4] = x 5
        let start = body.segments()[2].pos;
        body.update_followers();
        let expected = lerp3(start, Vec3::new(5.0, 0.0, 0.0), FOLLOW_LERP);
        assert!((body.segments()[2].pos - expected).length() < 1e-5);
    }

    #[test]
    fn test_followers_converge_on_still_head() {
        let mut body = SegmentedBody::new(Vec3::ZERO, Vec3::X, 4);
        let rest = Vec3::new(50.0, 20.0, -5.0);
        for _ in 0..200 {
            body.advance_head(rest);
            body.update_followers();
        }
        for pos in body.positions() {
            assert!((pos - rest).length() < 1e-3);
        }
    }

    #[test]
    fn test_reset() {
        let mut body = SegmentedBody::new(Vec3::splat(40.0), Vec3::X, 9);
        body.advance_head(Vec3::splat(41.0));
        body.reset(5);
        assert_eq!(body.len(), 5);
        assert_eq!(body.head(), Vec3::ZERO);
        assert!(body.trail().is_empty());
    }

    #[test]
    fn test_material_cycles() {
        let body = SegmentedBody::new(Vec3::ZERO, Vec3::X, 13);
        assert_eq!(body.segments()[1].material, 0);
        assert_eq!(body.segments()[10].material, 9);
        assert_eq!(body.segments()[11].material, 0);
    }
}
