//! JavaScript bindings
//!
//! The canvas/React front end owns rendering, audio and the participant
//! list. It drives the race through this handle and gets JSON back.

use wasm_bindgen::prelude::*;

use crate::settings::RaceConfig;
use crate::sim::{Participant, RaceClock, RacePhysics, SimRng};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"duck-race logger already initialized".into());
    }
}

/// One race in flight
#[wasm_bindgen]
pub struct DuckRace {
    engine: RacePhysics<SimRng>,
    clock: RaceClock,
}

#[wasm_bindgen]
impl DuckRace {
    /// Build from a JSON config, or the stored/default config when omitted
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<DuckRace, JsValue> {
        let config = match config_json {
            Some(json) => RaceConfig::from_json(&json).map_err(js_err)?,
            None => RaceConfig::load(),
        };
        let rng = SimRng::from_entropy();
        log::info!("Race engine created with seed: {}", rng.seed());

        Ok(DuckRace {
            engine: RacePhysics::with_rng(config, rng),
            clock: RaceClock::new(),
        })
    }

    /// Line up `[{name}]` and return the starting grid
    pub fn initialize(&mut self, roster_json: &str) -> Result<String, JsValue> {
        let roster: Vec<Participant> = serde_json::from_str(roster_json).map_err(js_err)?;
        self.clock.reset();
        self.engine.initialize(&roster);
        self.snapshot_json()
    }

    /// Advance with caller-supplied timing; returns racer snapshots
    pub fn update(&mut self, elapsed: f32, delta: f32) -> Result<String, JsValue> {
        self.engine.update(elapsed, delta);
        self.snapshot_json()
    }

    /// Advance from a `requestAnimationFrame` timestamp (ms)
    pub fn tick(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let frame = self.clock.frame(now_ms);
        self.update(frame.elapsed, frame.delta)
    }

    #[wasm_bindgen(js_name = determineWinners)]
    pub fn determine_winners(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.determine_winners()).map_err(js_err)
    }

    pub fn reset(&mut self, roster_json: &str) -> Result<(), JsValue> {
        let roster: Vec<Participant> = serde_json::from_str(roster_json).map_err(js_err)?;
        self.clock.reset();
        self.engine.reset(&roster);
        Ok(())
    }

    #[wasm_bindgen(js_name = snapshot)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot()).map_err(js_err)
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn progress(&self) -> f32 {
        self.engine.progress(self.clock.elapsed())
    }

    #[wasm_bindgen(js_name = timeRemaining)]
    pub fn time_remaining(&self) -> f32 {
        self.engine.time_remaining(self.clock.elapsed())
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.engine.is_finished(self.clock.elapsed())
    }

    /// Persist the active config to LocalStorage
    #[wasm_bindgen(js_name = saveConfig)]
    pub fn save_config(&self) {
        self.engine.config().save();
    }
}
