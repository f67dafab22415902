//! Entity populations
//!
//! One population per entity kind. Populations own their entities, animate
//! them and answer collision queries. Scans run newest-first so the first hit
//! can be removed without disturbing the rest of the scan.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Bounds, EntityKind, WorldEntity};
use crate::config::PopulationCounts;
use crate::consts::{ENRICHED_FOOD_INSERT_CHANCE, ENRICHED_FOOD_SPAWN_CHANCE};

/// Monotonic entity ID source
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Uniform random point in the world cube
pub fn random_position(half_extent: f32, rng: &mut Pcg32) -> Vec3 {
    Vec3::new(
        rng.random_range(-half_extent..=half_extent),
        rng.random_range(-half_extent..=half_extent),
        rng.random_range(-half_extent..=half_extent),
    )
}

/// All live entities of one kind
#[derive(Debug, Clone)]
pub struct Population {
    kind: EntityKind,
    entities: Vec<WorldEntity>,
}

impl Population {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entities: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WorldEntity> {
        self.entities.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldEntity> {
        self.entities.iter()
    }

    /// Create `count` entities at uniformly random positions
    pub fn spawn(&mut self, count: usize, half_extent: f32, rng: &mut Pcg32, ids: &mut IdAllocator) {
        self.entities.reserve(count);
        for _ in 0..count {
            let pos = random_position(half_extent, rng);
            let id = ids.next_id();
            let entity = if self.kind == EntityKind::Food {
                let enriched = rng.random_bool(ENRICHED_FOOD_SPAWN_CHANCE);
                WorldEntity::food(id, pos, enriched, rng)
            } else {
                WorldEntity::spawn(self.kind, id, pos, rng)
            };
            self.entities.push(entity);
        }
    }

    /// Create one entity at an explicit position, returning its ID
    pub fn insert_at(&mut self, pos: Vec3, rng: &mut Pcg32, ids: &mut IdAllocator) -> u32 {
        let id = ids.next_id();
        let entity = if self.kind == EntityKind::Food {
            let enriched = rng.random_bool(ENRICHED_FOOD_INSERT_CHANCE);
            WorldEntity::food(id, pos, enriched, rng)
        } else {
            WorldEntity::spawn(self.kind, id, pos, rng)
        };
        self.entities.push(entity);
        id
    }

    /// Add a prebuilt entity. Entities of another kind are rejected.
    pub fn push(&mut self, entity: WorldEntity) -> bool {
        if entity.kind() != self.kind {
            log::warn!(
                "Rejected {} entity pushed into {} population",
                entity.kind().as_str(),
                self.kind.as_str()
            );
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Detach an entity; render resources are released by whoever handles
    /// the despawn signal
    pub fn remove_at(&mut self, index: usize) -> Option<WorldEntity> {
        if index < self.entities.len() {
            Some(self.entities.remove(index))
        } else {
            None
        }
    }

    /// Move an entity to a fresh random position
    pub fn reposition(&mut self, index: usize, half_extent: f32, rng: &mut Pcg32) {
        if let Some(entity) = self.entities.get_mut(index) {
            entity.pos = random_position(half_extent, rng);
        }
    }

    pub fn update(&mut self, timestamp: f64, bounds: &Bounds) {
        for entity in &mut self.entities {
            entity.update(timestamp, bounds);
        }
    }

    /// Index of the newest entity colliding with `query`
    pub fn first_hit(&self, query: Vec3) -> Option<usize> {
        self.entities.iter().rposition(|e| e.check_collision(query))
    }

    /// ID of any entity colliding with `query`
    pub fn any_hit(&self, query: Vec3) -> Option<u32> {
        self.entities.iter().find(|e| e.check_collision(query)).map(|e| e.id)
    }

    /// Pull entities within `radius` of `point` toward it, faster when closer
    pub fn attract_toward(&mut self, point: Vec3, radius: f32, speed: f32) {
        if radius <= 0.0 {
            return;
        }
        for entity in &mut self.entities {
            let distance = entity.pos.distance(point);
            if distance < radius {
                let dir = (point - entity.pos).normalize_or_zero();
                entity.pos += dir * (speed * (1.0 - distance / radius));
            }
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

/// One population per kind
#[derive(Debug, Clone)]
pub struct Populations {
    pub food: Population,
    pub obstacles: Population,
    pub algae: Population,
    pub kelp: Population,
    pub amoebas: Population,
    pub rivals: Population,
    pub plants: Population,
    pub creatures: Population,
}

impl Default for Populations {
    fn default() -> Self {
        Self {
            food: Population::new(EntityKind::Food),
            obstacles: Population::new(EntityKind::Obstacle),
            algae: Population::new(EntityKind::Algae),
            kelp: Population::new(EntityKind::Kelp),
            amoebas: Population::new(EntityKind::Amoeba),
            rivals: Population::new(EntityKind::RivalSnake),
            plants: Population::new(EntityKind::FractalPlant),
            creatures: Population::new(EntityKind::FibonacciCreature),
        }
    }
}

impl Populations {
    /// Fill every population to its configured count
    pub fn spawn_all(&mut self, counts: &PopulationCounts, half_extent: f32, rng: &mut Pcg32, ids: &mut IdAllocator) {
        self.food.spawn(counts.food, half_extent, rng, ids);
        self.obstacles.spawn(counts.obstacles, half_extent, rng, ids);
        self.algae.spawn(counts.algae, half_extent, rng, ids);
        self.kelp.spawn(counts.kelp, half_extent, rng, ids);
        self.amoebas.spawn(counts.amoebas, half_extent, rng, ids);
        self.rivals.spawn(counts.rivals, half_extent, rng, ids);
        self.plants.spawn(counts.plants, half_extent, rng, ids);
        self.creatures.spawn(counts.creatures, half_extent, rng, ids);
    }

    pub fn get(&self, kind: EntityKind) -> &Population {
        match kind {
            EntityKind::Food => &self.food,
            EntityKind::Obstacle => &self.obstacles,
            EntityKind::Algae => &self.algae,
            EntityKind::Kelp => &self.kelp,
            EntityKind::Amoeba => &self.amoebas,
            EntityKind::RivalSnake => &self.rivals,
            EntityKind::FractalPlant => &self.plants,
            EntityKind::FibonacciCreature => &self.creatures,
        }
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> &mut Population {
        match kind {
            EntityKind::Food => &mut self.food,
            EntityKind::Obstacle => &mut self.obstacles,
            EntityKind::Algae => &mut self.algae,
            EntityKind::Kelp => &mut self.kelp,
            EntityKind::Amoeba => &mut self.amoebas,
            EntityKind::RivalSnake => &mut self.rivals,
            EntityKind::FractalPlant => &mut self.plants,
            EntityKind::FibonacciCreature => &mut self.creatures,
        }
    }

    /// Animate everything, in minimap order
    pub fn update_all(&mut self, timestamp: f64, bounds: &Bounds) {
        for kind in EntityKind::ALL {
            self.get_mut(kind).update(timestamp, bounds);
        }
    }

    pub fn total(&self) -> usize {
        EntityKind::ALL.iter().map(|&k| self.get(k).len()).sum()
    }

    pub fn clear(&mut self) {
        for kind in EntityKind::ALL {
            self.get_mut(kind).clear();
        }
    }

    /// Every live entity, in minimap order
    pub fn iter(&self) -> impl Iterator<Item = &WorldEntity> {
        EntityKind::ALL.into_iter().flat_map(move |k| self.get(k).iter())
    }
}
