//! Duck Race - raffle race simulation for a browser visualizer
//!
//! Core modules:
//! - `sim`: Race simulation (speed model, integration, fairness, results)
//! - `settings`: Data-driven race tuning, persisted on web
//! - `error`: Roster and configuration errors
//! - `wasm`: JavaScript bindings for the canvas front end (wasm32 only)

pub mod error;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{ConfigError, RosterError};
pub use settings::RaceConfig;
pub use sim::{Finisher, Participant, Podium, RacePhysics, Racer, RacerSnapshot, SimRng};

/// Default tuning values; `RaceConfig::default()` is built from these
pub mod consts {
    /// Race length in seconds
    pub const RACE_DURATION: f32 = 15.0;
    /// Pixels per second at multiplier 1.0
    pub const BASE_SPEED: f32 = 100.0;
    pub const MIN_SPEED_MULTIPLIER: f32 = 0.4;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.0;

    /// Minimum gap between target re-roll passes (ms)
    pub const SPEED_REFRESH_INTERVAL_MS: f32 = 2000.0;
    /// Per-racer re-roll schedule: base + random range (ms)
    pub const SPEED_CHANGE_BASE_MS: f32 = 1000.0;
    pub const SPEED_CHANGE_RANGE_MS: f32 = 2000.0;

    /// Per-racer characteristic ranges
    pub const BASE_SPEED_FACTOR_MIN: f32 = 0.85;
    pub const BASE_SPEED_FACTOR_MAX: f32 = 1.15;
    pub const ACCELERATION_MIN: f32 = 0.08;
    pub const ACCELERATION_MAX: f32 = 0.12;
    pub const STAMINA_MIN: f32 = 0.7;
    pub const STAMINA_MAX: f32 = 1.0;

    /// Burst/slowdown roll: 0.7x to 1.5x
    pub const SPEED_BURST_BASE: f32 = 0.7;
    pub const SPEED_BURST_RANGE: f32 = 0.8;

    /// Progress after which stamina is applied
    pub const LATE_RACE_THRESHOLD: f32 = 0.6;
    pub const STAMINA_EFFECT_BASE: f32 = 0.7;
    pub const STAMINA_EFFECT_RANGE: f32 = 0.6;

    /// Final sprint window (fraction of race) and boost roll (1.5x to 2.0x)
    pub const FINAL_SPRINT_START: f32 = 0.87;
    pub const FINAL_SPRINT_END: f32 = 0.93;
    pub const FINAL_SPRINT_BOOST_BASE: f32 = 1.5;
    pub const FINAL_SPRINT_BOOST_RANGE: f32 = 0.5;
    /// Final sprint candidates are ranks 2..=4
    pub const FINAL_SPRINT_MAX_RANK: usize = 4;

    /// Rubber-banding kicks in beyond twice this distance from the mean
    pub const POSITION_THRESHOLD_DISTANCE: f32 = 50.0;
    pub const CATCH_UP_FACTOR: f32 = 1.05;
    pub const LEAD_PENALTY_FACTOR: f32 = 0.95;
    /// Total width of the per-tick random factor (+/- half of this)
    pub const FAIRNESS_RANDOM_VARIANCE: f32 = 0.1;

    /// Canvas and lane layout
    pub const CANVAS_HEIGHT: f32 = 600.0;
    pub const RACE_AREA_TOP_FRACTION: f32 = 0.5;
    pub const RACE_AREA_BOTTOM_PADDING: f32 = 20.0;
    pub const MAX_LANE_HEIGHT: f32 = 80.0;
    pub const LANE_PADDING: f32 = 10.0;

    /// Horizontal mapping of position onto the canvas
    pub const TRACK_START_X: f32 = 80.0;
    pub const DISPLAY_MIN_X: f32 = 50.0;
    pub const DISPLAY_MAX_X: f32 = 600.0;
    /// Position treated as "all the way across" the visible track
    pub const TRACK_LENGTH: f32 = 4500.0;

    /// Cosmetic bobbing inside a lane
    pub const VERTICAL_JITTER_CHANCE: f32 = 0.02;
    pub const VERTICAL_JITTER: f32 = 4.0;

    /// Neon palette, cycled by racer id
    pub const DUCK_COLORS: [&str; 6] = [
        "#00ffff", "#ff00ff", "#9d00ff", "#ffff00", "#00ff00", "#ff0099",
    ];

    /// Demo roster for headless runs
    pub const DUCK_NAMES: [&str; 6] = ["NEON", "CYBER", "MATRIX", "BLADE", "GHOST", "CHROME"];

    /// Largest frame delta fed to the integrator (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;
    /// Native runner tick rate
    pub const SIM_DT: f32 = 1.0 / 60.0;
}
