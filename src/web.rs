//! Browser bindings
//!
//! The page owns the animation frame and keyboard listeners and forwards them
//! here; snapshots come back as JSON for the overlay to draw.

use wasm_bindgen::prelude::*;

use crate::driver::Driver;
use crate::highscores::HighScores;
use crate::sim::SimPhase;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Evasion training sim loaded");
}

#[wasm_bindgen]
pub struct TrainingSim {
    driver: Driver,
}

#[wasm_bindgen]
impl TrainingSim {
    /// Seeded from `Math.random` unless the page supplies a seed
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> Self {
        let seed = seed.unwrap_or_else(|| js_sys::Math::random() * u32::MAX as f64) as u64;
        log::info!("Training sim created with seed: {}", seed);
        Self {
            driver: Driver::new(seed),
        }
    }

    pub fn start(&mut self, now: f64) {
        self.driver.start(now);
    }

    pub fn abort(&mut self) {
        self.driver.abort();
    }

    /// Call from `requestAnimationFrame`; returns true while the run is live
    pub fn frame(&mut self, now: f64) -> bool {
        for event in self.driver.frame(now) {
            log::debug!("{:?}", event);
        }
        self.driver.phase() == SimPhase::Running
    }

    /// Forward `KeyboardEvent.key`; returns true if the page should preventDefault
    pub fn key_down(&mut self, key: &str, now: f64) -> bool {
        self.driver.key_down(key, now)
    }

    /// "Idle", "Running" or "GameOver"
    pub fn phase(&self) -> String {
        format!("{:?}", self.driver.phase())
    }

    pub fn display_score(&self) -> f64 {
        self.driver.snapshot().display_score as f64
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.driver
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    pub fn high_scores_json(&self) -> Result<String, JsValue> {
        self.driver
            .high_scores()
            .to_json()
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Restore a leaderboard previously saved by the page (e.g. LocalStorage)
    pub fn load_high_scores(&mut self, json: &str) -> Result<(), JsValue> {
        let scores = HighScores::from_json(json).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        self.driver.set_high_scores(scores);
        Ok(())
    }
}
