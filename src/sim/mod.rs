//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from a clock source, never read directly
//! - Seeded RNG only
//! - Stable iteration order (population order, then insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod entity;
pub mod motion;
pub mod population;
pub mod rival;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod trail;

pub use body::{BodySegment, SegmentedBody};
pub use clock::{Clock, ManualClock, run_frame};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::InstantClock;
pub use collision::{TerminalCause, boundary_overrun, check_terminal, resolve_reward_collisions};
pub use entity::{ConsumePolicy, EntityKind, Pose, Reward, Variant, WorldEntity};
pub use motion::{MotionController, MotionPhase, StepUpdate};
pub use population::{IdAllocator, Population, Populations};
pub use rival::RivalSnake;
pub use snapshot::{MinimapMarker, WorldSnapshot, minimap_markers, snapshot};
pub use state::{GameEvent, GamePhase, WorldState};
pub use tick::{TickInput, tick};
pub use trail::PositionTrail;
