//! Browser host bindings
//!
//! The page owns the render loop, the scene graph and the audio; it calls
//! [`WebGame::frame`] from `requestAnimationFrame` and reacts to the drained
//! events.

use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::sim::{GamePhase, TickInput, WorldState, snapshot, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already set when the module is re-instantiated
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Snake Abyss core loaded");
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn vec3_to_array(v: Vec3) -> js_sys::Float32Array {
    js_sys::Float32Array::from(&v.to_array()[..])
}

/// One game instance driven by the page
#[wasm_bindgen]
pub struct WebGame {
    state: WorldState,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// New game from an optional JSON config (empty string for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WebGame, JsValue> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json).map_err(|e| {
                log::warn!("Rejected config: {}", e);
                to_js_error(e)
            })?
        };
        let seed = js_sys::Date::now() as u64;
        Ok(Self {
            state: WorldState::new(config, seed),
            input: TickInput::default(),
        })
    }

    /// Latest steering controls; applied on every following frame
    pub fn set_controls(&mut self, yaw: f32, throttle: f32) {
        self.input = TickInput::from_controls(yaw, throttle);
    }

    /// Queue a pause toggle for the next frame
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Advance to page time `now` (ms)
    pub fn frame(&mut self, now: f64) {
        tick(&mut self.state, &self.input, now);
        // Pause is one-shot
        self.input.pause = false;
    }

    pub fn restart(&mut self) {
        let seed = js_sys::Date::now() as u64;
        self.state.reset(seed);
        self.input = TickInput::default();
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn is_paused(&self) -> bool {
        self.state.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn body_length(&self) -> usize {
        self.state.body_len()
    }

    /// Head position as `[x, y, z]`
    pub fn head(&self) -> js_sys::Float32Array {
        vec3_to_array(self.state.head())
    }

    /// Heading as `[x, y, z]`
    pub fn heading(&self) -> js_sys::Float32Array {
        vec3_to_array(self.state.heading())
    }

    /// Full frame snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&snapshot(&self.state)).map_err(to_js_error)
    }

    /// Pending events as a JSON array; the queue is emptied
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.drain_events()).map_err(to_js_error)
    }
}
