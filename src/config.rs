//! Game configuration
//!
//! Data-driven balance knobs. Every field has a default matching the shipped
//! game, so partial JSON documents are accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// When reward collisions are resolved during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CollisionCadence {
    /// Every rendered frame, against the in-flight head position
    #[default]
    PerFrame,
    /// Once per logical step, at step completion (frame-rate independent)
    PerStep,
}

impl CollisionCadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionCadence::PerFrame => "PerFrame",
            CollisionCadence::PerStep => "PerStep",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "perframe" | "frame" => Some(CollisionCadence::PerFrame),
            "perstep" | "step" => Some(CollisionCadence::PerStep),
            _ => None,
        }
    }
}

/// Target number of entities per population at world init
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationCounts {
    pub food: usize,
    pub obstacles: usize,
    pub algae: usize,
    pub kelp: usize,
    pub amoebas: usize,
    pub rivals: usize,
    pub plants: usize,
    pub creatures: usize,
}

impl Default for PopulationCounts {
    fn default() -> Self {
        Self {
            food: 900,
            obstacles: 15,
            algae: 200,
            kelp: 30,
            amoebas: 5,
            rivals: 60,
            plants: 20,
            creatures: 15,
        }
    }
}

impl PopulationCounts {
    /// All populations empty (useful for scripted worlds)
    pub fn empty() -> Self {
        Self {
            food: 0,
            obstacles: 0,
            algae: 0,
            kelp: 0,
            amoebas: 0,
            rivals: 0,
            plants: 0,
            creatures: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.food
            + self.obstacles
            + self.algae
            + self.kelp
            + self.amoebas
            + self.rivals
            + self.plants
            + self.creatures
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world size {0} must be positive")]
    WorldSize(f32),
    #[error("min step duration {min} ms exceeds base step duration {base} ms")]
    StepDuration { min: f64, base: f64 },
    #[error("step distance {0} must be positive")]
    StepDistance(f32),
    #[error("initial length must include the head (got 0)")]
    InitialLength,
    #[error("segment spacing must be at least 1")]
    SegmentSpacing,
}

/// Tunable game parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    /// Edge length of the cubic world
    pub world_size: f32,
    /// Head overrun margin before game over
    pub boundary_margin: f32,
    /// Reflection margin for drifting entities
    pub drift_margin: f32,

    // === Player ===
    /// Body length at start (head included)
    pub initial_length: usize,
    /// Distance per step
    pub step_distance: f32,
    /// Step duration at score 0 (ms)
    pub base_step_ms: f64,
    /// Step duration floor (ms)
    pub min_step_ms: f64,
    /// Trail samples between followers
    pub segment_spacing: usize,
    /// Offset of a grown segment behind the tail
    pub segment_size: f32,

    // === Collisions ===
    pub collision_cadence: CollisionCadence,

    // === Food attraction ===
    pub attraction_distance: f32,
    pub attraction_speed: f32,

    // === Populations ===
    pub populations: PopulationCounts,

    // === Minimap ===
    pub minimap_y_threshold: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            boundary_margin: BOUNDARY_MARGIN,
            drift_margin: DRIFT_MARGIN,

            initial_length: INITIAL_LENGTH,
            step_distance: STEP_DISTANCE,
            base_step_ms: BASE_STEP_DURATION,
            min_step_ms: MIN_STEP_DURATION,
            segment_spacing: SEGMENT_SPACING,
            segment_size: SEGMENT_SIZE,

            collision_cadence: CollisionCadence::PerFrame,

            attraction_distance: ATTRACTION_DISTANCE,
            attraction_speed: ATTRACTION_SPEED,

            populations: PopulationCounts::default(),

            minimap_y_threshold: MINIMAP_Y_THRESHOLD,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_size > 0.0) {
            return Err(ConfigError::WorldSize(self.world_size));
        }
        if self.min_step_ms > self.base_step_ms || self.min_step_ms <= 0.0 {
            return Err(ConfigError::StepDuration {
                min: self.min_step_ms,
                base: self.base_step_ms,
            });
        }
        if !(self.step_distance > 0.0) {
            return Err(ConfigError::StepDistance(self.step_distance));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::InitialLength);
        }
        if self.segment_spacing == 0 {
            return Err(ConfigError::SegmentSpacing);
        }
        Ok(())
    }

    /// Config with every population empty
    pub fn empty_world() -> Self {
        Self {
            populations: PopulationCounts::empty(),
            ..Self::default()
        }
    }

    /// Half-extent of the world cube, never negative
    pub fn half_world(&self) -> f32 {
        (self.world_size / 2.0).max(0.0)
    }

    /// Step duration for a given score: one ms faster per speed level, floored
    pub fn step_duration_for_score(&self, score: u64) -> f64 {
        let speed_level = (score / SCORE_PER_SPEED_LEVEL) as f64;
        (self.base_step_ms - speed_level).max(self.min_step_ms)
    }
}
