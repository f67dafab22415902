//! World state and core simulation types
//!
//! Everything the director mutates lives in one explicit record, threaded
//! through every call.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::body::SegmentedBody;
use super::collision::TerminalCause;
use super::entity::{Bounds, EntityKind, WorldEntity};
use super::motion::MotionController;
use super::population::{IdAllocator, Populations};
use crate::config::GameConfig;
use crate::initial_heading;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Snake moving, world animating
    Running,
    /// Every mutation skipped until resumed
    Paused,
    /// Run ended; only a reset recovers
    GameOver,
}

/// Discrete signals for the audio, render and UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The player ate something
    Ate {
        kind: EntityKind,
        id: u32,
        pos: Vec3,
        score_gain: u64,
        growth: usize,
    },
    /// Entity added mid-game (conversions, shatters)
    Spawned { kind: EntityKind, id: u32, pos: Vec3 },
    /// Entity left its population; render resources can be released
    Despawned { kind: EntityKind, id: u32 },
    ScoreChanged { score: u64 },
    SpeedChanged { step_ms: f64 },
    Paused,
    Resumed,
    GameOver { final_score: u64, cause: TerminalCause },
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct WorldState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u64,
    pub phase: GamePhase,
    /// Player snake
    pub player: SegmentedBody,
    pub motion: MotionController,
    pub populations: Populations,
    pub bounds: Bounds,
    /// Current step duration (ms), derived from score
    pub step_duration: f64,
    /// Running ticks processed
    pub time_ticks: u64,
    /// Clock time of the first paused tick
    pub(crate) paused_at: Option<f64>,
    events: Vec<GameEvent>,
    ids: IdAllocator,
}

fn player_body(config: &GameConfig) -> SegmentedBody {
    let mut body =
        SegmentedBody::new(Vec3::ZERO, initial_heading(), 1).with_spacing(config.segment_spacing, config.segment_size);
    body.grow(config.initial_length.saturating_sub(1));
    body
}

impl WorldState {
    /// Create and populate a world with the given seed.
    ///
    /// An invalid config is logged and replaced by the defaults.
    pub fn new(mut config: GameConfig, seed: u64) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Rejected config ({}), using defaults", e);
            config = GameConfig::default();
        }
        let mut state = Self {
            player: player_body(&config),
            motion: MotionController::new(config.step_distance),
            bounds: Bounds::from_config(&config),
            step_duration: config.step_duration_for_score(0),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Running,
            populations: Populations::default(),
            time_ticks: 0,
            paused_at: None,
            events: Vec::new(),
            ids: IdAllocator::default(),
        };
        state.populate();
        log::info!(
            "World ready: seed={}, size={}, cadence={}, entities={}",
            seed,
            state.config.world_size,
            state.config.collision_cadence.as_str(),
            state.populations.total()
        );
        state
    }

    fn populate(&mut self) {
        let half = self.config.half_world();
        self.populations
            .spawn_all(&self.config.populations, half, &mut self.rng, &mut self.ids);
    }

    /// Start over with a fresh seed: new populations, score 0, initial body
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.ids = IdAllocator::default();
        self.score = 0;
        self.phase = GamePhase::Running;
        self.step_duration = self.config.step_duration_for_score(0);
        self.time_ticks = 0;
        self.paused_at = None;
        self.events.clear();

        self.motion.stop();
        self.player.set_heading(initial_heading());
        self.player.reset(self.config.initial_length);

        self.populations.clear();
        self.populate();
        log::info!("World reset: seed={}, entities={}", seed, self.populations.total());
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    /// Create one entity of `kind` at `pos`, returning its ID
    pub fn spawn_at(&mut self, kind: EntityKind, pos: Vec3) -> u32 {
        let id = self
            .populations
            .get_mut(kind)
            .insert_at(pos, &mut self.rng, &mut self.ids);
        self.emit(GameEvent::Spawned { kind, id, pos });
        id
    }

    /// Add a prebuilt entity to its population
    pub fn place(&mut self, entity: WorldEntity) -> bool {
        self.populations.get_mut(entity.kind()).push(entity)
    }

    /// Flip between running and paused. No effect once the game is over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.set_paused(true),
            GamePhase::Paused => self.set_paused(false),
            GamePhase::GameOver => {}
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        match (self.phase, paused) {
            (GamePhase::Running, true) => {
                self.phase = GamePhase::Paused;
                self.emit(GameEvent::Paused);
            }
            (GamePhase::Paused, false) => {
                self.phase = GamePhase::Running;
                self.emit(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn head(&self) -> Vec3 {
        self.player.head()
    }

    pub fn heading(&self) -> Vec3 {
        self.player.heading()
    }

    pub fn body_len(&self) -> usize {
        self.player.len()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
