//! Per-frame world tick
//!
//! Fixed order: heading, motion and reward collisions, population animation,
//! terminal checks at step completion, speed recompute, game over.

use glam::Vec3;

use super::collision::{check_terminal, resolve_reward_collisions};
use super::state::{GameEvent, GamePhase, WorldState};
use crate::config::CollisionCadence;
use crate::heading_from_controls;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Desired direction of travel (None keeps the current heading)
    pub heading: Option<Vec3>,
    /// Pitch control in [0, 1]; steers only, never changes step duration
    pub throttle: f32,
    /// Pause toggle
    pub pause: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            heading: None,
            throttle: 0.5,
            pause: false,
        }
    }
}

impl TickInput {
    /// Input from a yaw angle and throttle
    pub fn from_controls(yaw: f32, throttle: f32) -> Self {
        Self {
            heading: Some(heading_from_controls(yaw, throttle)),
            throttle,
            pause: false,
        }
    }

    pub fn toward(heading: Vec3) -> Self {
        Self {
            heading: Some(heading),
            ..Self::default()
        }
    }

    pub fn pause() -> Self {
        Self {
            pause: true,
            ..Self::default()
        }
    }
}

/// Advance the world to clock time `now` (ms)
pub fn tick(state: &mut WorldState, input: &TickInput, now: f64) {
    // Handle pause toggle
    if input.pause {
        state.toggle_pause();
    }

    match state.phase {
        GamePhase::GameOver => return,
        GamePhase::Paused => {
            // Freeze the in-flight step; the gap is skipped on resume
            state.paused_at.get_or_insert(now);
            return;
        }
        GamePhase::Running => {}
    }
    if let Some(paused_at) = state.paused_at.take() {
        state.motion.delay(now - paused_at);
    }
    state.time_ticks += 1;

    // 1. Heading
    if let Some(heading) = input.heading {
        if heading.length_squared() > 0.0 {
            state.player.set_heading(heading);
        } else {
            log::warn!("Zero heading ignored, keeping {:?}", state.player.heading());
        }
    }

    // 2. Motion, with reward collisions on the in-flight head
    state.motion.begin_step(&state.player, now);
    let step = state.motion.tick(&mut state.player, now, state.step_duration);
    let mut completed = false;
    if let Some(update) = step {
        completed = update.completed;
        let resolve = match state.config.collision_cadence {
            CollisionCadence::PerFrame => true,
            CollisionCadence::PerStep => update.completed,
        };
        if resolve {
            resolve_reward_collisions(state, update.head);
        }
    }

    // 3. Animate populations
    state.populations.update_all(now, &state.bounds);
    let head = state.player.head();
    state
        .populations
        .food
        .attract_toward(head, state.config.attraction_distance, state.config.attraction_speed);

    // 4. Terminal conditions, only once the step has landed
    let mut terminal = None;
    if completed {
        log::trace!("Step complete at {:?}", head);
        terminal = check_terminal(state, head);
        if terminal.is_none() {
            state.motion.begin_step(&state.player, now);
        }
    }

    // 5. Speed from score
    let step_ms = state.config.step_duration_for_score(state.score);
    if step_ms != state.step_duration {
        log::debug!("Step duration {} -> {} ms", state.step_duration, step_ms);
        state.step_duration = step_ms;
        state.emit(GameEvent::SpeedChanged { step_ms });
    }

    // 6. Game over
    if let Some(cause) = terminal {
        state.phase = GamePhase::GameOver;
        state.motion.stop();
        log::info!("Game over ({}): final score {}", cause.as_str(), state.score);
        let final_score = state.score;
        state.emit(GameEvent::GameOver { final_score, cause });
    }
}
