//! AI-controlled rival snakes
//!
//! Rivals wander on their own: constant speed, a new random heading every
//! 50-149 ticks, reflection off the world walls. Each owns its body and trail.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::SegmentedBody;
use super::entity::reflect_in_bounds;
use crate::consts::*;

/// Rival body colors (RGB hex)
pub const RIVAL_COLORS: [u32; 5] = [0xff0000, 0xffff00, 0xff00ff, 0x00ffff, 0xff8800];

/// Random unit vector from a uniform cube sample
pub fn random_heading(rng: &mut Pcg32) -> Vec3 {
    Vec3::new(
        rng.random::<f32>() * 2.0 - 1.0,
        rng.random::<f32>() * 2.0 - 1.0,
        rng.random::<f32>() * 2.0 - 1.0,
    )
    .try_normalize()
    .unwrap_or(Vec3::X)
}

fn random_turn_interval(rng: &mut Pcg32) -> u32 {
    rng.random_range(50..150)
}

/// A wandering snake the player can eat head-on
#[derive(Debug, Clone)]
pub struct RivalSnake {
    body: SegmentedBody,
    /// Units per tick
    speed: f32,
    turn_counter: u32,
    turn_interval: u32,
    pub color: u32,
    /// Own steering stream, independent of world spawning
    rng: Pcg32,
}

impl RivalSnake {
    /// Rival with its head at `head`, 1-40 segments long
    pub fn spawn(head: Vec3, rng: &mut Pcg32) -> Self {
        let length = 1 + rng.random_range(0..RIVAL_MAX_LENGTH);
        let heading = random_heading(rng);
        let speed = rng.random_range(0.8..1.3);
        let turn_interval = random_turn_interval(rng);
        let color = RIVAL_COLORS[rng.random_range(0..RIVAL_COLORS.len())];
        let own_rng = Pcg32::seed_from_u64(rng.random());
        Self::with_length(head, heading, length, speed, turn_interval, color, own_rng)
    }

    fn with_length(
        head: Vec3,
        heading: Vec3,
        length: usize,
        speed: f32,
        turn_interval: u32,
        color: u32,
        rng: Pcg32,
    ) -> Self {
        let mut body = SegmentedBody::new(head, heading, 1).with_spacing(SEGMENT_SPACING, RIVAL_INITIAL_SPACING);
        body.grow(length.saturating_sub(1));
        Self {
            body,
            speed,
            turn_counter: 0,
            turn_interval,
            color,
            rng,
        }
    }

    /// Fixed-shape rival for scripted worlds
    pub fn scripted(head: Vec3, heading: Vec3, length: usize, speed: f32, seed: u64) -> Self {
        Self::with_length(head, heading, length, speed, u32::MAX, RIVAL_COLORS[0], Pcg32::seed_from_u64(seed))
    }

    pub fn head(&self) -> Vec3 {
        self.body.head()
    }

    pub fn heading(&self) -> Vec3 {
        self.body.heading()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn body(&self) -> &SegmentedBody {
        &self.body
    }

    /// One tick of wandering; `limit` is the reflection plane distance
    pub fn update(&mut self, limit: f32) {
        self.turn_counter += 1;
        if self.turn_counter > self.turn_interval {
            self.body.set_heading(random_heading(&mut self.rng));
            self.turn_counter = 0;
            self.turn_interval = random_turn_interval(&mut self.rng);
        }

        let mut heading = self.body.heading();
        let mut head = self.body.head() + heading * self.speed;
        reflect_in_bounds(&mut head, &mut heading, limit);
        self.body.set_heading(heading);

        self.body.advance_head(head);
        self.body.update_followers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            let rival = RivalSnake::spawn(Vec3::ZERO, &mut rng);
            assert!((1..=RIVAL_MAX_LENGTH).contains(&rival.len()));
            assert!((0.8..1.3).contains(&rival.speed()));
            assert!((rival.heading().length() - 1.0).abs() < 1e-5);
            assert!(RIVAL_COLORS.contains(&rival.color));
        }
    }

    #[test]
    fn test_initial_segments_spaced_behind_head() {
        let rival = RivalSnake::scripted(Vec3::ZERO, Vec3::Z, 4, 1.0, 1);
        let positions: Vec<_> = rival.body().positions().collect();
        assert_eq!(positions.len(), 4);
        for (j, pos) in positions.iter().enumerate() {
            let expected = Vec3::new(0.0, 0.0, -(j as f32) * RIVAL_INITIAL_SPACING);
            assert!((*pos - expected).length() < 1e-4);
        }
    }

    #[test]
    fn test_update_moves_head_by_speed() {
        let mut rival = RivalSnake::scripted(Vec3::ZERO, Vec3::X, 3, 1.25, 1);
        rival.update(990.0);
        assert!((rival.head() - Vec3::new(1.25, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(rival.body().trail().len(), 1);
    }

    #[test]
    fn test_update_reflects_at_wall() {
        let mut rival = RivalSnake::scripted(Vec3::new(989.5, 0.0, 0.0), Vec3::X, 1, 1.0, 1);
        rival.update(990.0);
        assert_eq!(rival.head().x, 990.0);
        assert!(rival.heading().x < 0.0);
        rival.update(990.0);
        assert!(rival.head().x < 990.0);
    }

    #[test]
    fn test_wandering_stays_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut rival = RivalSnake::spawn(Vec3::new(900.0, -900.0, 0.0), &mut rng);
        let start_len = rival.len();
        for _ in 0..3000 {
            rival.update(990.0);
            assert!(rival.head().abs().max_element() <= 990.0);
        }
        assert_eq!(rival.len(), start_len);
    }
}
