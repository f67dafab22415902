//! Snake Abyss - A 3D deep-sea snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, growth, collisions, world state)
//! - `config`: Data-driven game balance
//! - `web`: Browser host bindings (wasm32 only)

pub mod config;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{CollisionCadence, ConfigError, GameConfig};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Edge length of the cubic world volume
    pub const WORLD_SIZE: f32 = 2000.0;
    /// Head overrun margin inside the world bounds (game over past this)
    pub const BOUNDARY_MARGIN: f32 = 10.0;
    /// Reflection margin for drifting entities
    pub const DRIFT_MARGIN: f32 = 20.0;

    /// Maximum positions kept in a trail
    pub const TRAIL_CAPACITY: usize = 10_000;
    /// Trail samples between consecutive followers
    pub const SEGMENT_SPACING: usize = 12;
    /// Exponential approach factor for followers (per tick)
    pub const FOLLOW_LERP: f32 = 0.3;
    /// Offset of a freshly grown segment behind the tail
    pub const SEGMENT_SIZE: f32 = 12.0;
    /// Body length at game start (head included)
    pub const INITIAL_LENGTH: usize = 5;
    /// Yaw of the opening heading (level, 60 degrees right of -Z)
    pub const INITIAL_YAW: f32 = std::f32::consts::FRAC_PI_3;

    /// Distance covered by one logical step
    pub const STEP_DISTANCE: f32 = 1.0;
    /// Step duration at score 0 (ms)
    pub const BASE_STEP_DURATION: f64 = 10.0;
    /// Step duration floor (ms)
    pub const MIN_STEP_DURATION: f64 = 3.0;
    /// Score per speed level
    pub const SCORE_PER_SPEED_LEVEL: u64 = 100;

    /// Food pulled toward the head within this radius
    pub const ATTRACTION_DISTANCE: f32 = 100.0;
    /// Attraction displacement per tick at zero distance
    pub const ATTRACTION_SPEED: f32 = 0.1;

    /// Minimap shows entities within this vertical distance of the head
    pub const MINIMAP_Y_THRESHOLD: f32 = 40.0;

    /// Rival snake head/segment reflection margin
    pub const RIVAL_BOUNDARY_MARGIN: f32 = 10.0;
    /// Spacing of a rival's initial segments behind its head
    pub const RIVAL_INITIAL_SPACING: f32 = 10.0;
    /// Longest rival body at spawn
    pub const RIVAL_MAX_LENGTH: usize = 40;

    /// Share of enriched food in the initial bulk spawn
    pub const ENRICHED_FOOD_SPAWN_CHANCE: f64 = 0.3;
    /// Share of enriched food among converted/inserted food
    pub const ENRICHED_FOOD_INSERT_CHANCE: f64 = 0.2;
}

/// Linear interpolation between two points
#[inline]
pub fn lerp3(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from + (to - from) * t
}

/// Convert a yaw angle and a throttle in [0, 1] to a normalized heading.
///
/// Throttle steers pitch: 0.5 is level, 0 dives, 1 climbs. Z is flipped so
/// that yaw 0 faces into the screen.
#[inline]
pub fn heading_from_controls(yaw: f32, throttle: f32) -> Vec3 {
    use std::f32::consts::FRAC_PI_2;
    let pitch = ((throttle.clamp(0.0, 1.0) - 0.5) * FRAC_PI_2).clamp(-FRAC_PI_2, FRAC_PI_2);
    Vec3::new(
        pitch.cos() * yaw.sin(),
        pitch.sin(),
        -(pitch.cos() * yaw.cos()),
    )
    .normalize_or_zero()
}

/// Heading at game start
#[inline]
pub fn initial_heading() -> Vec3 {
    heading_from_controls(consts::INITIAL_YAW, 0.5)
}
