//! Race tuning and preferences
//!
//! Persisted in LocalStorage on web; read from a JSON file by the native runner.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Every tunable the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RaceConfig {
    // === Timing ===
    /// Race length (seconds)
    pub race_duration: f32,
    /// Minimum gap between target re-roll passes (ms)
    pub speed_refresh_interval_ms: f32,
    /// Per-racer re-roll delay: base + U(0, range) ms
    pub speed_change_base_ms: f32,
    pub speed_change_range_ms: f32,

    // === Speed model ===
    /// Pixels per second at multiplier 1.0
    pub base_speed: f32,
    pub min_speed_multiplier: f32,
    pub max_speed_multiplier: f32,
    pub base_speed_factor_min: f32,
    pub base_speed_factor_max: f32,
    pub acceleration_min: f32,
    pub acceleration_max: f32,
    pub stamina_min: f32,
    pub stamina_max: f32,
    pub speed_burst_base: f32,
    pub speed_burst_range: f32,
    /// Progress fraction after which stamina applies
    pub late_race_threshold: f32,
    pub stamina_effect_base: f32,
    pub stamina_effect_range: f32,

    // === Final sprint ===
    pub final_sprint_start: f32,
    pub final_sprint_end: f32,
    pub final_sprint_boost_base: f32,
    pub final_sprint_boost_range: f32,

    // === Fairness ===
    pub position_threshold_distance: f32,
    pub catch_up_factor: f32,
    pub lead_penalty_factor: f32,
    pub fairness_random_variance: f32,

    // === Display ===
    pub palette: Vec<String>,
    pub canvas_height: f32,
    pub race_area_top_fraction: f32,
    pub race_area_bottom_padding: f32,
    pub max_lane_height: f32,
    pub lane_padding: f32,
    pub track_start_x: f32,
    pub display_min_x: f32,
    pub display_max_x: f32,
    pub track_length: f32,
    pub vertical_jitter_chance: f32,
    pub vertical_jitter: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            race_duration: RACE_DURATION,
            speed_refresh_interval_ms: SPEED_REFRESH_INTERVAL_MS,
            speed_change_base_ms: SPEED_CHANGE_BASE_MS,
            speed_change_range_ms: SPEED_CHANGE_RANGE_MS,

            base_speed: BASE_SPEED,
            min_speed_multiplier: MIN_SPEED_MULTIPLIER,
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,
            base_speed_factor_min: BASE_SPEED_FACTOR_MIN,
            base_speed_factor_max: BASE_SPEED_FACTOR_MAX,
            acceleration_min: ACCELERATION_MIN,
            acceleration_max: ACCELERATION_MAX,
            stamina_min: STAMINA_MIN,
            stamina_max: STAMINA_MAX,
            speed_burst_base: SPEED_BURST_BASE,
            speed_burst_range: SPEED_BURST_RANGE,
            late_race_threshold: LATE_RACE_THRESHOLD,
            stamina_effect_base: STAMINA_EFFECT_BASE,
            stamina_effect_range: STAMINA_EFFECT_RANGE,

            final_sprint_start: FINAL_SPRINT_START,
            final_sprint_end: FINAL_SPRINT_END,
            final_sprint_boost_base: FINAL_SPRINT_BOOST_BASE,
            final_sprint_boost_range: FINAL_SPRINT_BOOST_RANGE,

            position_threshold_distance: POSITION_THRESHOLD_DISTANCE,
            catch_up_factor: CATCH_UP_FACTOR,
            lead_penalty_factor: LEAD_PENALTY_FACTOR,
            fairness_random_variance: FAIRNESS_RANDOM_VARIANCE,

            palette: DUCK_COLORS.iter().map(|c| c.to_string()).collect(),
            canvas_height: CANVAS_HEIGHT,
            race_area_top_fraction: RACE_AREA_TOP_FRACTION,
            race_area_bottom_padding: RACE_AREA_BOTTOM_PADDING,
            max_lane_height: MAX_LANE_HEIGHT,
            lane_padding: LANE_PADDING,
            track_start_x: TRACK_START_X,
            display_min_x: DISPLAY_MIN_X,
            display_max_x: DISPLAY_MAX_X,
            track_length: TRACK_LENGTH,
            vertical_jitter_chance: VERTICAL_JITTER_CHANCE,
            vertical_jitter: VERTICAL_JITTER,
        }
    }
}

impl RaceConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot make sense of
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("raceDuration", self.race_duration)?;
        positive("baseSpeed", self.base_speed)?;
        positive("speedRefreshIntervalMs", self.speed_refresh_interval_ms)?;
        positive("minSpeedMultiplier", self.min_speed_multiplier)?;
        positive("trackLength", self.track_length)?;
        positive("catchUpFactor", self.catch_up_factor)?;
        positive("leadPenaltyFactor", self.lead_penalty_factor)?;

        ordered(
            "speedMultiplier",
            self.min_speed_multiplier,
            self.max_speed_multiplier,
        )?;
        ordered(
            "baseSpeedFactor",
            self.base_speed_factor_min,
            self.base_speed_factor_max,
        )?;
        ordered("acceleration", self.acceleration_min, self.acceleration_max)?;
        ordered("stamina", self.stamina_min, self.stamina_max)?;
        ordered("displayX", self.display_min_x, self.display_max_x)?;
        ordered(
            "finalSprintWindow",
            self.final_sprint_start,
            self.final_sprint_end,
        )?;

        fraction("acceleration", self.acceleration_max)?;
        fraction("lateRaceThreshold", self.late_race_threshold)?;
        fraction("finalSprintStart", self.final_sprint_start)?;
        fraction("finalSprintEnd", self.final_sprint_end)?;
        fraction("raceAreaTopFraction", self.race_area_top_fraction)?;
        fraction("verticalJitterChance", self.vertical_jitter_chance)?;

        // 1 + (u - 0.5) * variance must stay positive for u in [0, 1)
        half_open(
            "fairnessRandomVariance",
            self.fairness_random_variance,
            0.0,
            2.0,
        )?;

        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        Ok(())
    }

    /// Race progress in [0, 1] for the given elapsed seconds
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.race_duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.race_duration).clamp(0.0, 1.0)
    }

    /// Whether progress falls inside the final-sprint window
    pub fn in_final_sprint(&self, progress: f32) -> bool {
        progress >= self.final_sprint_start && progress <= self.final_sprint_end
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "duck_race_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded race config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored race config: {}", e),
                }
            }
        }

        log::info!("Using default race config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("Race config saved"),
                    Err(e) => log::warn!("Failed to save race config: {:?}", e),
                }
            }
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}

fn fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotAFraction { field, value })
    }
}

fn half_open(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RaceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RaceConfig::from_json(r#"{ "raceDuration": 30.0, "baseSpeed": 120 }"#)
            .expect("partial config should parse");
        assert_eq!(config.race_duration, 30.0);
        assert_eq!(config.base_speed, 120.0);
        assert_eq!(config.max_speed_multiplier, MAX_SPEED_MULTIPLIER);
        assert_eq!(config.palette.len(), DUCK_COLORS.len());
    }

    #[test]
    fn test_rejects_inverted_multiplier_range() {
        let err = RaceConfig::from_json(r#"{ "minSpeedMultiplier": 3.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedRange {
                field: "speedMultiplier",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_palette_and_zero_duration() {
        let err = RaceConfig::from_json(r#"{ "palette": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPalette));

        let err = RaceConfig::from_json(r#"{ "raceDuration": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "raceDuration",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_positive_fairness_factors() {
        for json in [r#"{ "catchUpFactor": 0 }"#, r#"{ "catchUpFactor": -1.0 }"#] {
            let err = RaceConfig::from_json(json).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::NotPositive {
                    field: "catchUpFactor",
                    ..
                }
            ));
        }

        for json in [
            r#"{ "leadPenaltyFactor": 0 }"#,
            r#"{ "leadPenaltyFactor": -1.0 }"#,
        ] {
            let err = RaceConfig::from_json(json).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::NotPositive {
                    field: "leadPenaltyFactor",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_fairness_variance_must_stay_below_two() {
        for json in [
            r#"{ "fairnessRandomVariance": 2.0 }"#,
            r#"{ "fairnessRandomVariance": 3.0 }"#,
            r#"{ "fairnessRandomVariance": -0.1 }"#,
        ] {
            let err = RaceConfig::from_json(json).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::OutOfRange {
                    field: "fairnessRandomVariance",
                    ..
                }
            ));
        }

        let config = RaceConfig::from_json(r#"{ "fairnessRandomVariance": 1.9 }"#)
            .expect("variance below 2 is accepted");
        assert_eq!(config.fairness_random_variance, 1.9);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            RaceConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_progress_and_sprint_window() {
        let config = RaceConfig::default();
        assert_eq!(config.progress(-1.0), 0.0);
        assert!((config.progress(7.5) - 0.5).abs() < 1e-6);
        assert_eq!(config.progress(100.0), 1.0);

        assert!(!config.in_final_sprint(0.5));
        assert!(config.in_final_sprint(0.9));
        assert!(!config.in_final_sprint(0.95));
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let json = RaceConfig::default().to_json().unwrap();
        assert!(json.contains("\"raceDuration\""));
        assert!(json.contains("\"finalSprintBoostBase\""));
    }
}
