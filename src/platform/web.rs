//! Browser bindings
//!
//! `WebGame` is the handle a JS renderer holds: it forwards input, drives
//! ticks from `requestAnimationFrame` timestamps, and hands back a JSON
//! snapshot to draw.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::persistence::{KeyValueStore, StoreError};
use crate::sim::{Clock, GamePhase, Simulation};

/// `window.performance.now()`
#[derive(Debug, Default)]
pub struct PerformanceClock;

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

/// `window.localStorage`, looked up on every access
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation<LocalStorage>,
    clock: PerformanceClock,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game from an optional JSON config override
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebGame, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialised when a second game is created
        let _ = console_log::init_with_level(log::Level::Info);

        let config = match config_json {
            Some(json) => GameConfig::from_json(&json),
            None => Ok(GameConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = js_sys::Date::now() as u64;
        let sim = Simulation::new(config, LocalStorage, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame {
            sim,
            clock: PerformanceClock,
        })
    }

    /// Input hook for click/tap/space
    pub fn flap(&mut self) {
        self.sim.flap();
    }

    /// Advance to a `requestAnimationFrame` timestamp
    pub fn tick(&mut self, timestamp_ms: f64) {
        self.sim.tick(timestamp_ms);
    }

    /// Advance using `performance.now()`
    pub fn tick_now(&mut self) {
        self.sim.tick_with(&self.clock);
    }

    pub fn reset(&mut self) {
        self.sim.reset();
    }

    /// Current snapshot serialized for the renderer
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.sim.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn score(&self) -> u32 {
        self.sim.score()
    }

    pub fn best_score(&self) -> u32 {
        self.sim.best_score()
    }

    pub fn phase(&self) -> String {
        match self.sim.phase() {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::Dead => "dead",
        }
        .to_string()
    }
}
