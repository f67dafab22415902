//! Collision resolution
//!
//! Reward collisions are table-driven: the kind's [`Reward`] decides score,
//! growth and what becomes of the eaten entity. Obstacles and world bounds are
//! fatal and checked separately, only at step completion.

use glam::Vec3;
use serde::Serialize;

use super::entity::{ConsumePolicy, EntityKind, Reward};
use super::state::{GameEvent, WorldState};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TerminalCause {
    /// Head left the playable volume
    Boundary,
    /// Head touched an obstacle
    Obstacle { id: u32 },
}

impl TerminalCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalCause::Boundary => "boundary",
            TerminalCause::Obstacle { .. } => "obstacle",
        }
    }
}

/// True when any coordinate of `head` lies past `half_extent - margin`
pub fn boundary_overrun(head: Vec3, half_extent: f32, margin: f32) -> bool {
    head.abs().max_element() > half_extent - margin
}

/// Fatal conditions at `head`, boundary first
pub fn check_terminal(state: &WorldState, head: Vec3) -> Option<TerminalCause> {
    if boundary_overrun(head, state.config.half_world(), state.config.boundary_margin) {
        return Some(TerminalCause::Boundary);
    }
    state
        .populations
        .obstacles
        .any_hit(head)
        .map(|id| TerminalCause::Obstacle { id })
}

/// Resolve reward collisions at `head`.
///
/// Populations are visited in [`EntityKind::REWARD_ORDER`]; each fires at most
/// once. Returns the number of collisions applied.
pub fn resolve_reward_collisions(state: &mut WorldState, head: Vec3) -> usize {
    let mut hits = 0;
    for kind in EntityKind::REWARD_ORDER {
        let Some(reward) = kind.reward() else {
            continue;
        };
        let Some(index) = state.populations.get(kind).first_hit(head) else {
            continue;
        };
        if consume(state, kind, index, reward) {
            hits += 1;
        }
    }
    if hits > 0 {
        let score = state.score;
        state.emit(GameEvent::ScoreChanged { score });
    }
    hits
}

fn consume(state: &mut WorldState, kind: EntityKind, index: usize, reward: Reward) -> bool {
    let Some((id, pos)) = state.populations.get(kind).get(index).map(|e| (e.id, e.pos)) else {
        return false;
    };

    state.score += reward.score;
    state.player.grow(reward.growth);
    state.emit(GameEvent::Ate {
        kind,
        id,
        pos,
        score_gain: reward.score,
        growth: reward.growth,
    });
    log::debug!(
        "Ate {} #{}: +{} score, length {}",
        kind.as_str(),
        id,
        reward.score,
        state.player.len()
    );

    match reward.policy {
        ConsumePolicy::Respawn => {
            let half = state.config.half_world();
            state
                .populations
                .get_mut(kind)
                .reposition(index, half, &mut state.rng);
        }
        ConsumePolicy::ConvertToFood => {
            if state.populations.get_mut(kind).remove_at(index).is_some() {
                state.emit(GameEvent::Despawned { kind, id });
                state.spawn_at(EntityKind::Food, pos);
            }
        }
        ConsumePolicy::Remove => {
            if state.populations.get_mut(kind).remove_at(index).is_some() {
                state.emit(GameEvent::Despawned { kind, id });
            }
        }
        ConsumePolicy::ShatterToFood => {
            if let Some(entity) = state.populations.get_mut(kind).remove_at(index) {
                state.emit(GameEvent::Despawned { kind, id });
                for segment in entity.segment_positions() {
                    state.spawn_at(EntityKind::Food, segment);
                }
            }
        }
    }
    true
}
