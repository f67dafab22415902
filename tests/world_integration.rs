//! Whole-world scenarios driven through the public tick API

use glam::Vec3;
use snake_abyss::config::{CollisionCadence, GameConfig, PopulationCounts};
use snake_abyss::sim::{
    EntityKind, GameEvent, ManualClock, RivalSnake, TerminalCause, TickInput, WorldEntity, WorldState, run_frame,
    tick,
};

fn empty_world(cadence: CollisionCadence) -> WorldState {
    let config = GameConfig {
        collision_cadence: cadence,
        ..GameConfig::empty_world()
    };
    let mut state = WorldState::new(config, 7);
    state.player.set_heading(Vec3::X);
    state
}

fn small_config() -> GameConfig {
    GameConfig {
        populations: PopulationCounts {
            food: 120,
            obstacles: 4,
            algae: 30,
            kelp: 8,
            amoebas: 3,
            rivals: 6,
            plants: 4,
            creatures: 4,
        },
        ..GameConfig::default()
    }
}

fn place_plain_food(state: &mut WorldState, pos: Vec3) -> u32 {
    let id = state.next_entity_id();
    let food = WorldEntity::food(id, pos, false, &mut state.rng);
    state.place(food);
    id
}

fn ate_count(events: &[GameEvent], kind: EntityKind) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::Ate { kind: k, .. } if *k == kind))
        .count()
}

#[test]
fn food_adds_ten_score_and_two_segments() {
    let mut state = empty_world(CollisionCadence::PerFrame);
    place_plain_food(&mut state, Vec3::new(0.0, 0.0, 20.0));
    tick(&mut state, &TickInput::default(), 0.0);
    assert_eq!(state.score, 10);
    assert_eq!(state.body_len(), 7);
    assert_eq!(state.populations.food.len(), 1);
    assert!(state.events().contains(&GameEvent::ScoreChanged { score: 10 }));
}

#[test]
fn amoeba_adds_two_hundred_and_three_segments() {
    let mut state = empty_world(CollisionCadence::PerFrame);
    let id = state.spawn_at(EntityKind::Amoeba, Vec3::new(0.0, 10.0, 0.0));
    tick(&mut state, &TickInput::default(), 0.0);
    assert_eq!(state.score, 200);
    assert_eq!(state.body_len(), 8);
    assert!(state.populations.amoebas.is_empty());
    assert!(state.events().contains(&GameEvent::Despawned {
        kind: EntityKind::Amoeba,
        id
    }));
}

#[test]
fn rival_becomes_one_food_per_segment() {
    let mut state = empty_world(CollisionCadence::PerFrame);
    let rival = RivalSnake::scripted(Vec3::new(10.0, 0.0, 0.0), Vec3::X, 7, 1.0, 3);
    let segments: Vec<Vec3> = rival.body().positions().collect();
    let id = state.next_entity_id();
    state.place(WorldEntity::rival(id, rival));

    tick(&mut state, &TickInput::default(), 0.0);
    assert_eq!(state.score, 500);
    assert_eq!(state.body_len(), 5);
    assert!(state.populations.rivals.is_empty());
    assert_eq!(state.populations.food.len(), segments.len());

    let spawned: Vec<Vec3> = state
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::Spawned {
                kind: EntityKind::Food,
                pos,
                ..
            } => Some(*pos),
            _ => None,
        })
        .collect();
    assert_eq!(spawned, segments);
}

#[test]
fn one_collision_per_population_per_tick() {
    let mut state = empty_world(CollisionCadence::PerFrame);
    for i in 0..5 {
        place_plain_food(&mut state, Vec3::new(0.0, i as f32, 5.0));
    }
    tick(&mut state, &TickInput::default(), 0.0);
    assert_eq!(ate_count(state.events(), EntityKind::Food), 1);
    assert_eq!(state.score, 10);
    assert_eq!(state.body_len(), 7);
    assert_eq!(state.populations.food.len(), 5);
}

#[test]
fn different_populations_fire_in_same_tick() {
    let mut state = empty_world(CollisionCadence::PerFrame);
    place_plain_food(&mut state, Vec3::new(0.0, 0.0, 5.0));
    state.spawn_at(EntityKind::Algae, Vec3::new(0.0, 5.0, 0.0));
    state.spawn_at(EntityKind::Kelp, Vec3::new(0.0, -5.0, 0.0));
    state.drain_events();

    tick(&mut state, &TickInput::default(), 0.0);
    let events = state.drain_events();
    assert_eq!(ate_count(&events, EntityKind::Food), 1);
    assert_eq!(ate_count(&events, EntityKind::Algae), 1);
    assert_eq!(ate_count(&events, EntityKind::Kelp), 1);
    assert_eq!(state.score, 10 + 50 + 30);
    assert_eq!(state.body_len(), 5 + 2 + 1 + 2);
    // Algae and kelp each left one food behind
    assert_eq!(state.populations.food.len(), 3);
}

#[test]
fn boundary_overrun_ends_game_on_step_completion() {
    let mut state = empty_world(CollisionCadence::PerFrame);
    state.player = snake_abyss::sim::SegmentedBody::new(Vec3::new(0.0, 0.0, -989.5), Vec3::NEG_Z, 3);
    tick(&mut state, &TickInput::default(), 0.0);
    tick(&mut state, &TickInput::default(), 10.0);
    assert!(state.is_game_over());
    assert!(state.events().contains(&GameEvent::GameOver {
        final_score: 0,
        cause: TerminalCause::Boundary
    }));
}

#[test]
fn obstacle_contact_ends_game() {
    let mut state = empty_world(CollisionCadence::PerFrame);
    let id = state.next_entity_id();
    state.place(WorldEntity::obstacle(id, Vec3::new(15.0, 0.0, 0.0), 20.0));

    tick(&mut state, &TickInput::default(), 0.0);
    assert!(state.is_running());
    tick(&mut state, &TickInput::default(), 10.0);
    assert!(state.is_game_over());
    assert!(matches!(
        state.events().last(),
        Some(GameEvent::GameOver {
            cause: TerminalCause::Obstacle { id: hit },
            ..
        }) if *hit == id
    ));
}

#[test]
fn pause_toggles_leave_world_untouched() {
    let mut state = WorldState::new(small_config(), 11);
    let positions = |s: &WorldState| s.populations.iter().map(|e| e.pos).collect::<Vec<_>>();
    let before = positions(&state);
    for _ in 0..4 {
        state.toggle_pause();
    }
    assert_eq!(positions(&state), before);
    assert_eq!(state.score, 0);

    state.toggle_pause();
    for now in [16.0, 32.0, 400.0] {
        tick(&mut state, &TickInput::toward(Vec3::Y), now);
    }
    assert_eq!(positions(&state), before);
    assert_eq!(state.head(), Vec3::ZERO);
    assert!((state.heading() - snake_abyss::initial_heading()).length() < 1e-6);
}

#[test]
fn body_never_shrinks() {
    let mut state = WorldState::new(small_config(), 5);
    let mut clock = ManualClock::new(16.0);
    let mut last_len = state.body_len();
    let mut grown = 0;
    for frame in 0..1500 {
        let t = frame as f32 / 60.0;
        run_frame(&mut state, &TickInput::from_controls(t * 0.5, 0.5), &mut clock);
        assert!(state.body_len() >= last_len);
        last_len = state.body_len();
        for event in state.drain_events() {
            if let GameEvent::Ate { growth, .. } = event {
                grown += growth;
            }
        }
    }
    assert_eq!(state.body_len(), 5 + grown);
}

#[test]
fn step_duration_tracks_score() {
    let mut state = empty_world(CollisionCadence::PerFrame);
    state.score = 250;
    tick(&mut state, &TickInput::default(), 0.0);
    assert_eq!(state.step_duration, 8.0);
    state.score = 1050;
    tick(&mut state, &TickInput::default(), 1.0);
    assert_eq!(state.step_duration, 3.0);
}

#[test]
fn per_step_cadence_waits_for_completion() {
    let food_at = Vec3::new(50.25, 0.0, 0.0);

    let mut per_frame = empty_world(CollisionCadence::PerFrame);
    place_plain_food(&mut per_frame, food_at);
    tick(&mut per_frame, &TickInput::default(), 0.0);
    assert_eq!(per_frame.score, 0);
    tick(&mut per_frame, &TickInput::default(), 5.0);
    assert_eq!(per_frame.score, 10);

    let mut per_step = empty_world(CollisionCadence::PerStep);
    place_plain_food(&mut per_step, food_at);
    tick(&mut per_step, &TickInput::default(), 0.0);
    tick(&mut per_step, &TickInput::default(), 5.0);
    assert_eq!(per_step.score, 0);
    tick(&mut per_step, &TickInput::default(), 10.0);
    assert_eq!(per_step.score, 10);
}

#[test]
fn same_seed_same_run() {
    let run = || {
        let mut state = WorldState::new(small_config(), 2024);
        let mut clock = ManualClock::new(16.0);
        for frame in 0..400 {
            let t = frame as f32 / 60.0;
            run_frame(&mut state, &TickInput::from_controls(t, 0.6), &mut clock);
        }
        let entities: Vec<(u32, Vec3)> = state.populations.iter().map(|e| (e.id, e.pos)).collect();
        (state.score, state.head(), state.body_len(), entities)
    };
    assert_eq!(run(), run());
}

#[test]
fn reset_after_game_over_plays_again() {
    let mut state = WorldState::new(small_config(), 1);
    state.player = snake_abyss::sim::SegmentedBody::new(Vec3::new(989.9, 0.0, 0.0), Vec3::X, 5);
    tick(&mut state, &TickInput::default(), 0.0);
    tick(&mut state, &TickInput::default(), 10.0);
    assert!(state.is_game_over());

    state.reset(2);
    assert!(state.is_running());
    assert_eq!(state.head(), Vec3::ZERO);
    assert!((state.heading() - snake_abyss::initial_heading()).length() < 1e-6);
    tick(&mut state, &TickInput::default(), 20.0);
    tick(&mut state, &TickInput::default(), 25.0);
    assert!((state.head() - snake_abyss::initial_heading() * 0.5).length() < 1e-5);
}
