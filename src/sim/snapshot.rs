//! Read-only views of the world for render and UI hosts

use glam::Vec3;
use serde::Serialize;

use super::body::BodySegment;
use super::entity::{EntityKind, Pose};
use super::state::{GamePhase, WorldState};

/// One dot on the minimap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimapMarker {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec3,
    pub color: &'static str,
    pub size: f32,
    /// Rival body positions (empty for everything else)
    pub segments: Vec<Vec3>,
}

/// Entities to draw on the minimap, in population order.
///
/// With a threshold, only entities whose Y is within it of the player head
/// are kept.
pub fn minimap_markers(state: &WorldState, y_threshold: Option<f32>) -> Vec<MinimapMarker> {
    let head_y = state.head().y;
    state
        .populations
        .iter()
        .filter(|e| y_threshold.is_none_or(|t| (e.pos.y - head_y).abs() <= t))
        .map(|e| {
            let kind = e.kind();
            let (color, size) = kind.minimap_style();
            MinimapMarker {
                id: e.id,
                kind,
                pos: e.pos,
                color,
                size,
                segments: e
                    .as_rival()
                    .map(|r| r.body().positions().skip(1).collect())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// Render-side view of one entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec3,
    pub pose: Pose,
    pub enriched: bool,
}

/// Everything a host needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub step_ms: f64,
    /// Running ticks since start or reset
    pub ticks: u64,
    pub head: Vec3,
    pub heading: Vec3,
    pub body: Vec<BodySegment>,
    pub entities: Vec<EntityView>,
    pub minimap: Vec<MinimapMarker>,
}

pub fn snapshot(state: &WorldState) -> WorldSnapshot {
    WorldSnapshot {
        phase: state.phase,
        score: state.score,
        step_ms: state.step_duration,
        ticks: state.time_ticks,
        head: state.head(),
        heading: state.heading(),
        body: state.player.segments().to_vec(),
        entities: state
            .populations
            .iter()
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind(),
                pos: e.pos,
                pose: e.pose,
                enriched: e.is_enriched_food(),
            })
            .collect(),
        minimap: minimap_markers(state, Some(state.config.minimap_y_threshold)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entity::WorldEntity;
    use crate::sim::rival::RivalSnake;

    #[test]
    fn test_minimap_filters_by_height() {
        let mut state = WorldState::new(GameConfig::empty_world(), 1);
        state.spawn_at(EntityKind::Kelp, Vec3::new(100.0, 39.0, 0.0));
        state.spawn_at(EntityKind::Kelp, Vec3::new(100.0, -41.0, 0.0));
        let near = minimap_markers(&state, Some(40.0));
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].pos.y, 39.0);
        assert_eq!(near[0].color, "#8855ff");
        assert_eq!(minimap_markers(&state, None).len(), 2);
    }

    #[test]
    fn test_rival_marker_lists_segments() {
        let mut state = WorldState::new(GameConfig::empty_world(), 1);
        let id = state.next_entity_id();
        state.place(WorldEntity::rival(
            id,
            RivalSnake::scripted(Vec3::new(200.0, 0.0, 0.0), Vec3::X, 4, 1.0, 1),
        ));
        let markers = minimap_markers(&state, None);
        assert_eq!(markers[0].kind, EntityKind::RivalSnake);
        assert_eq!(markers[0].segments.len(), 3);
        assert_eq!(markers[0].size, 4.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = WorldState::new(GameConfig::empty_world(), 1);
        state.spawn_at(EntityKind::Amoeba, Vec3::new(5.0, 0.0, 5.0));
        let snap = snapshot(&state);
        assert_eq!(snap.body.len(), 5);
        assert_eq!(snap.entities.len(), 1);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"Amoeba\""));
        assert!(json.contains("\"score\":0"));
        assert_eq!(snap.ticks, 0);
    }

    #[test]
    fn test_snapshot_counts_running_ticks() {
        let mut state = WorldState::new(GameConfig::empty_world(), 1);
        for now in [0.0, 16.0, 32.0] {
            crate::sim::tick(&mut state, &crate::sim::TickInput::default(), now);
        }
        state.toggle_pause();
        crate::sim::tick(&mut state, &crate::sim::TickInput::default(), 48.0);
        assert_eq!(snapshot(&state).ticks, 3);
        state.reset(2);
        assert_eq!(snapshot(&state).ticks, 0);
    }
}
