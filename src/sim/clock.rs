//! Clock sources driving the tick
//!
//! The simulation never reads wall time itself; whoever drives it supplies
//! `now` from a [`Clock`].

use super::state::WorldState;
use super::tick::{TickInput, tick};

/// Millisecond time source
pub trait Clock {
    /// Current time in ms. Successive calls never go backwards.
    fn now_ms(&mut self) -> f64;
}

/// Deterministic clock advancing a fixed amount per read
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: f64,
    frame_ms: f64,
}

impl ManualClock {
    pub fn new(frame_ms: f64) -> Self {
        Self::starting_at(0.0, frame_ms)
    }

    pub fn starting_at(now: f64, frame_ms: f64) -> Self {
        Self {
            now,
            frame_ms: frame_ms.max(0.0),
        }
    }

    /// Time of the last read
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Jump forward without a tick (simulates a stalled frame)
    pub fn advance(&mut self, ms: f64) {
        self.now += ms.max(0.0);
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> f64 {
        self.now += self.frame_ms;
        self.now
    }
}

/// Wall clock measured from construction
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct InstantClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for InstantClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for InstantClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Read the clock once and tick the world at that time. Returns the time used.
pub fn run_frame<C: Clock + ?Sized>(state: &mut WorldState, input: &TickInput, clock: &mut C) -> f64 {
    let now = clock.now_ms();
    tick(state, input, now);
    now
}
