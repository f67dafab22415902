//! Step-based head motion
//!
//! Each step moves the head `step_distance` along the heading, interpolated
//! over the current step duration so the head never teleports.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::SegmentedBody;
use crate::lerp3;

/// Motion state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionPhase {
    Idle,
    Moving {
        /// Head position when the step began
        start: Vec3,
        /// Head position at step completion
        target: Vec3,
        /// Clock time (ms) the step began
        started_at: f64,
    },
}

/// Result of advancing an in-flight step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepUpdate {
    /// Fraction of the step covered, in [0, 1]
    pub progress: f32,
    /// Head position after this tick
    pub head: Vec3,
    /// Step finished this tick (controller is Idle again)
    pub completed: bool,
}

/// Converts heading into interpolated head displacement
#[derive(Debug, Clone)]
pub struct MotionController {
    phase: MotionPhase,
    step_distance: f32,
}

impl MotionController {
    pub fn new(step_distance: f32) -> Self {
        Self {
            phase: MotionPhase::Idle,
            step_distance,
        }
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.phase, MotionPhase::Moving { .. })
    }

    /// Start a step along the body's heading. No-op while a step is in flight.
    pub fn begin_step(&mut self, body: &SegmentedBody, now: f64) {
        if self.is_moving() {
            return;
        }
        let start = body.head();
        self.phase = MotionPhase::Moving {
            start,
            target: start + body.heading() * self.step_distance,
            started_at: now,
        };
    }

    /// Advance the in-flight step to `now`.
    ///
    /// Moves the head, records the trail and updates followers. Returns `None`
    /// when idle.
    pub fn tick(&mut self, body: &mut SegmentedBody, now: f64, step_duration: f64) -> Option<StepUpdate> {
        let MotionPhase::Moving {
            start,
            target,
            started_at,
        } = self.phase
        else {
            return None;
        };

        let progress = step_progress(now - started_at, step_duration);
        let head = lerp3(start, target, progress);
        body.advance_head(head);
        body.update_followers();

        let completed = progress >= 1.0;
        if completed {
            self.phase = MotionPhase::Idle;
        }
        Some(StepUpdate {
            progress,
            head,
            completed,
        })
    }

    /// Shift the in-flight step start (used to skip paused time)
    pub fn delay(&mut self, ms: f64) {
        if let MotionPhase::Moving { started_at, .. } = &mut self.phase {
            *started_at += ms;
        }
    }

    /// Drop any in-flight step
    pub fn stop(&mut self) {
        self.phase = MotionPhase::Idle;
    }
}

/// Progress of a step after `elapsed` ms, clamped to [0, 1]
pub fn step_progress(elapsed: f64, step_duration: f64) -> f32 {
    if step_duration <= 0.0 {
        return 1.0;
    }
    (elapsed / step_duration).clamp(0.0, 1.0) as f32
}
