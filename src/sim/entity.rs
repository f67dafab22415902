//! World entities
//!
//! One closed set of variants sharing a common record. Kind-level facts
//! (collision radius, reward, consume policy) come from lookup tables keyed by
//! [`EntityKind`]; per-instance animation lives in the variant payload.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rival::RivalSnake;
use crate::config::GameConfig;
use crate::consts::RIVAL_BOUNDARY_MARGIN;

/// Entity variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Food,
    Obstacle,
    Algae,
    Kelp,
    Amoeba,
    RivalSnake,
    FractalPlant,
    FibonacciCreature,
}

/// What happens to an entity once eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumePolicy {
    /// Stays in the population at a fresh random position
    Respawn,
    /// Removed; one food appears where it was
    ConvertToFood,
    /// Removed
    Remove,
    /// Removed; one food appears at every former body segment
    ShatterToFood,
}

/// Payout for eating an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub score: u64,
    /// Segments added to the eater
    pub growth: usize,
    pub policy: ConsumePolicy,
}

impl EntityKind {
    /// Every kind, in minimap order
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Food,
        EntityKind::Obstacle,
        EntityKind::Algae,
        EntityKind::Kelp,
        EntityKind::Amoeba,
        EntityKind::RivalSnake,
        EntityKind::FractalPlant,
        EntityKind::FibonacciCreature,
    ];

    /// Edible kinds in collision priority order
    pub const REWARD_ORDER: [EntityKind; 7] = [
        EntityKind::Food,
        EntityKind::Algae,
        EntityKind::Kelp,
        EntityKind::Amoeba,
        EntityKind::RivalSnake,
        EntityKind::FractalPlant,
        EntityKind::FibonacciCreature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Food => "food",
            EntityKind::Obstacle => "obstacle",
            EntityKind::Algae => "algae",
            EntityKind::Kelp => "kelp",
            EntityKind::Amoeba => "amoeba",
            EntityKind::RivalSnake => "rivalSnake",
            EntityKind::FractalPlant => "fractalPlant",
            EntityKind::FibonacciCreature => "fibonacciCreature",
        }
    }

    /// Reward table. Obstacles are fatal, not edible.
    pub fn reward(&self) -> Option<Reward> {
        use ConsumePolicy::*;
        let (score, growth, policy) = match self {
            EntityKind::Food => (10, 2, Respawn),
            EntityKind::Algae => (50, 1, ConvertToFood),
            EntityKind::Kelp => (30, 2, ConvertToFood),
            EntityKind::Amoeba => (200, 3, Remove),
            EntityKind::RivalSnake => (500, 0, ShatterToFood),
            EntityKind::FractalPlant => (150, 2, Remove),
            EntityKind::FibonacciCreature => (300, 3, Remove),
            EntityKind::Obstacle => return None,
        };
        Some(Reward {
            score,
            growth,
            policy,
        })
    }

    /// Fixed collision radius (obstacles scale with their size instead)
    pub fn collision_radius(&self) -> Option<f32> {
        match self {
            EntityKind::Food => Some(50.0),
            EntityKind::Algae => Some(30.0),
            EntityKind::Kelp => Some(50.0),
            EntityKind::Amoeba => Some(50.0),
            EntityKind::RivalSnake => Some(20.0),
            EntityKind::FractalPlant => Some(60.0),
            EntityKind::FibonacciCreature => Some(50.0),
            EntityKind::Obstacle => None,
        }
    }

    /// Minimap color and dot size
    pub fn minimap_style(&self) -> (&'static str, f32) {
        match self {
            EntityKind::Food => ("#ff5555", 2.0),
            EntityKind::Obstacle => ("#aa55ff", 3.0),
            EntityKind::Algae => ("#55ff55", 2.0),
            EntityKind::Kelp => ("#8855ff", 2.0),
            EntityKind::Amoeba => ("#ff88ff", 3.0),
            EntityKind::RivalSnake => ("#ff0000", 4.0),
            EntityKind::FractalPlant => ("#33aa33", 3.0),
            EntityKind::FibonacciCreature => ("#ffaa00", 4.0),
        }
    }
}

/// Obstacle radius for a cube of edge `size`
pub fn obstacle_radius(size: f32) -> f32 {
    6.0 + size / 2.0
}

/// Where drifting things bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_extent: f32,
    pub drift_margin: f32,
    pub rival_margin: f32,
}

impl Bounds {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            half_extent: config.half_world(),
            drift_margin: config.drift_margin,
            rival_margin: RIVAL_BOUNDARY_MARGIN,
        }
    }

    /// Never negative; a world thinner than the margin pins drifters at 0
    pub fn drift_limit(&self) -> f32 {
        (self.half_extent - self.drift_margin).max(0.0)
    }

    pub fn rival_limit(&self) -> f32 {
        (self.half_extent - self.rival_margin).max(0.0)
    }
}

/// Reflect `dir` on every axis where `pos` passed `limit`, clamping `pos` back
pub fn reflect_in_bounds(pos: &mut Vec3, dir: &mut Vec3, limit: f32) {
    for axis in 0..3 {
        if pos[axis].abs() > limit {
            dir[axis] = -dir[axis];
            pos[axis] = pos[axis].signum() * limit;
        }
    }
}

/// Cosmetic transform for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub scale: f32,
    pub rotation: Vec3,
    pub hue: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: Vec3::ZERO,
            hue: 0.0,
        }
    }
}

/// Liquid flow parameters of enriched food
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flow {
    pub speed: f32,
    pub direction: Vec3,
    pub time_offset: f32,
    pub pulse_speed: f32,
    pub spin: Vec3,
}

/// Food sub-kind; both share radius and reward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoodKind {
    Plain,
    Enriched(Flow),
}

/// Sway animation (kelp, fractal plants)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sway {
    pub base: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub time_offset: f32,
}

/// Pulse + spin animation (amoebas, fibonacci creatures)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub speed: f32,
    pub time_offset: f32,
    pub spin: Vec3,
}

/// Per-variant payload
#[derive(Debug, Clone)]
pub enum Variant {
    Food(FoodKind),
    Obstacle { size: f32 },
    Algae { drift: Vec3, spin: Vec3 },
    Kelp(Sway),
    Amoeba(Pulse),
    RivalSnake(Box<RivalSnake>),
    FractalPlant(Sway),
    FibonacciCreature(Pulse),
}

/// A positioned, collidable, animated world object
#[derive(Debug, Clone)]
pub struct WorldEntity {
    pub id: u32,
    /// Position (a rival's head)
    pub pos: Vec3,
    pub pose: Pose,
    pub variant: Variant,
}

fn small_spin(rng: &mut Pcg32) -> Vec3 {
    Vec3::new(
        (rng.random::<f32>() - 0.5) * 0.01,
        (rng.random::<f32>() - 0.5) * 0.01,
        (rng.random::<f32>() - 0.5) * 0.01,
    )
}

impl WorldEntity {
    /// New entity of `kind` at `pos` with randomized animation parameters.
    ///
    /// Food created this way is plain; use [`WorldEntity::food`] to choose.
    pub fn spawn(kind: EntityKind, id: u32, pos: Vec3, rng: &mut Pcg32) -> Self {
        let mut pose = Pose::default();
        let variant = match kind {
            EntityKind::Food => Variant::Food(FoodKind::Plain),
            EntityKind::Obstacle => Variant::Obstacle {
                size: rng.random_range(20.0..50.0),
            },
            EntityKind::Algae => Variant::Algae {
                drift: Vec3::new(
                    rng.random::<f32>() * 0.1 - 0.05,
                    rng.random::<f32>() * 0.1 - 0.05,
                    rng.random::<f32>() * 0.1 - 0.05,
                ),
                spin: small_spin(rng),
            },
            EntityKind::Kelp => {
                pose.scale = rng.random_range(0.7..1.3);
                Variant::Kelp(Sway {
                    base: rng.random::<f32>() * TAU,
                    speed: rng.random_range(0.02..0.03),
                    amplitude: rng.random_range(0.2..0.5),
                    time_offset: rng.random::<f32>() * 1000.0,
                })
            }
            EntityKind::Amoeba => Variant::Amoeba(Pulse {
                speed: rng.random_range(0.5..1.0),
                time_offset: 0.0,
                spin: small_spin(rng),
            }),
            EntityKind::RivalSnake => Variant::RivalSnake(Box::new(RivalSnake::spawn(pos, rng))),
            EntityKind::FractalPlant => {
                pose.scale = rng.random_range(0.5..1.5);
                Variant::FractalPlant(Sway {
                    base: 0.0,
                    speed: rng.random_range(0.005..0.015),
                    amplitude: rng.random_range(0.1..0.3),
                    time_offset: rng.random::<f32>() * 1000.0,
                })
            }
            EntityKind::FibonacciCreature => Variant::FibonacciCreature(Pulse {
                speed: rng.random_range(0.003..0.008),
                time_offset: rng.random::<f32>() * 1000.0,
                spin: small_spin(rng),
            }),
        };
        Self {
            id,
            pos,
            pose,
            variant,
        }
    }

    /// Food at `pos`, enriched (drifting) or plain
    pub fn food(id: u32, pos: Vec3, enriched: bool, rng: &mut Pcg32) -> Self {
        let kind = if enriched {
            let direction = Vec3::new(
                rng.random::<f32>() - 0.5,
                rng.random::<f32>() - 0.5,
                rng.random::<f32>() - 0.5,
            )
            .try_normalize()
            .unwrap_or(Vec3::Y);
            FoodKind::Enriched(Flow {
                speed: rng.random_range(0.01..0.03),
                direction,
                time_offset: rng.random::<f32>() * 1000.0,
                pulse_speed: rng.random_range(0.003..0.008),
                spin: small_spin(rng),
            })
        } else {
            FoodKind::Plain
        };
        Self {
            id,
            pos,
            pose: Pose::default(),
            variant: Variant::Food(kind),
        }
    }

    /// Obstacle cube of edge `size`
    pub fn obstacle(id: u32, pos: Vec3, size: f32) -> Self {
        Self {
            id,
            pos,
            pose: Pose::default(),
            variant: Variant::Obstacle { size },
        }
    }

    /// Wrap an already built rival; the entity sits at the rival's head
    pub fn rival(id: u32, rival: RivalSnake) -> Self {
        Self {
            id,
            pos: rival.head(),
            pose: Pose::default(),
            variant: Variant::RivalSnake(Box::new(rival)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self.variant {
            Variant::Food(_) => EntityKind::Food,
            Variant::Obstacle { .. } => EntityKind::Obstacle,
            Variant::Algae { .. } => EntityKind::Algae,
            Variant::Kelp(_) => EntityKind::Kelp,
            Variant::Amoeba(_) => EntityKind::Amoeba,
            Variant::RivalSnake(_) => EntityKind::RivalSnake,
            Variant::FractalPlant(_) => EntityKind::FractalPlant,
            Variant::FibonacciCreature(_) => EntityKind::FibonacciCreature,
        }
    }

    pub fn is_enriched_food(&self) -> bool {
        matches!(self.variant, Variant::Food(FoodKind::Enriched(_)))
    }

    pub fn as_rival(&self) -> Option<&RivalSnake> {
        match &self.variant {
            Variant::RivalSnake(rival) => Some(rival),
            _ => None,
        }
    }

    pub fn collision_radius(&self) -> f32 {
        match self.variant {
            Variant::Obstacle { size } => obstacle_radius(size),
            _ => self.kind().collision_radius().unwrap_or(0.0),
        }
    }

    /// Strict distance test against the collision radius
    pub fn check_collision(&self, query: Vec3) -> bool {
        query.distance(self.pos) < self.collision_radius()
    }

    /// Positions this entity leaves behind when shattered
    pub fn segment_positions(&self) -> Vec<Vec3> {
        match &self.variant {
            Variant::RivalSnake(rival) => rival.body().positions().collect(),
            _ => vec![self.pos],
        }
    }

    /// Advance animation (and drift, for drifting variants)
    pub fn update(&mut self, timestamp: f64, bounds: &Bounds) {
        let time = (timestamp * 0.001) as f32;
        match &mut self.variant {
            Variant::Food(FoodKind::Plain) => {
                self.pose.rotation.x += 0.008;
                self.pose.rotation.y += 0.012;
            }
            Variant::Food(FoodKind::Enriched(flow)) => {
                self.pose.scale = (time * flow.pulse_speed * 2.0 + flow.time_offset).sin() * 0.15 + 1.0;
                self.pose.hue = (time * 0.001 + flow.time_offset * 0.0001).rem_euclid(1.0);
                let wave = (time * flow.speed + flow.time_offset).sin() * 0.8;
                self.pos += flow.direction * (wave * 0.1);
                self.pose.rotation += flow.spin;
                reflect_in_bounds(&mut self.pos, &mut flow.direction, bounds.drift_limit());
            }
            Variant::Obstacle { .. } => {}
            Variant::Algae { drift, spin } => {
                self.pos += *drift;
                self.pose.rotation += *spin;
                reflect_in_bounds(&mut self.pos, drift, bounds.drift_limit());
            }
            Variant::Kelp(sway) => {
                let t = time + sway.time_offset * 0.001;
                self.pose.rotation.y = sway.base + (t * sway.speed).sin() * sway.amplitude;
            }
            Variant::Amoeba(pulse) => {
                self.pose.scale = (time * pulse.speed).sin() * 0.1 + 1.0;
                self.pose.rotation += pulse.spin;
            }
            Variant::RivalSnake(rival) => {
                rival.update(bounds.rival_limit());
                self.pos = rival.head();
            }
            Variant::FractalPlant(sway) => {
                let t = time + sway.time_offset;
                self.pose.rotation.z = (t * sway.speed).sin() * sway.amplitude;
            }
            Variant::FibonacciCreature(pulse) => {
                let t = time + pulse.time_offset;
                self.pose.scale = (t * pulse.speed).sin() * 0.1 + 1.0;
                self.pose.rotation += pulse.spin;
                self.pose.hue = (t * 0.001).rem_euclid(1.0);
            }
        }
    }
}
