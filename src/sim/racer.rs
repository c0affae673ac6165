//! Racer entity and its per-race characteristics

use serde::{Deserialize, Serialize};

use super::layout::Lane;
use super::random::{RandomSource, uniform};
use crate::settings::RaceConfig;

/// Traits rolled once per race; they bias but never fix the outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Characteristics {
    /// Overall pace bias
    pub base_speed_factor: f32,
    /// Fraction of the gap to target closed each tick
    pub acceleration_rate: f32,
    /// Late-race scaling; low stamina fades
    pub stamina: f32,
}

impl Characteristics {
    pub fn roll<R: RandomSource + ?Sized>(rng: &mut R, config: &RaceConfig) -> Self {
        Self {
            base_speed_factor: uniform(
                rng,
                config.base_speed_factor_min,
                config.base_speed_factor_max,
            ),
            acceleration_rate: uniform(rng, config.acceleration_min, config.acceleration_max),
            stamina: uniform(rng, config.stamina_min, config.stamina_max),
        }
    }
}

/// One duck in the race
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Racer {
    /// Entry order, 0-based
    pub id: u32,
    pub name: String,
    pub color: String,
    /// Accumulated distance; the only measure of progress
    pub position: f32,
    /// Canvas x derived from `position`
    pub display_x: f32,
    /// Canvas y, bobbing inside `lane`
    pub y: f32,
    pub lane: Lane,
    pub speed_multiplier: f32,
    pub target_speed_multiplier: f32,
    /// Effective speed applied on the last tick (px/s)
    pub current_speed: f32,
    pub traits: Characteristics,
    /// Logical race time (ms) of the next target re-roll
    pub next_speed_change_at_ms: f32,
    /// One-off surge granted during the final sprint
    pub final_sprint_boost: Option<f32>,
}

impl Racer {
    pub fn new(id: u32, name: String, color: String, lane: Lane, traits: Characteristics) -> Self {
        Self {
            id,
            name,
            color,
            position: 0.0,
            display_x: 0.0,
            y: lane.base_y,
            lane,
            speed_multiplier: 1.0,
            target_speed_multiplier: 1.0,
            current_speed: 0.0,
            traits,
            next_speed_change_at_ms: 0.0,
            final_sprint_boost: None,
        }
    }

    /// Ease the live multiplier toward its target (exponential smoothing)
    #[inline]
    pub fn ease_speed(&mut self, min: f32, max: f32) {
        self.speed_multiplier +=
            (self.target_speed_multiplier - self.speed_multiplier) * self.traits.acceleration_rate;
        self.speed_multiplier = self.speed_multiplier.max(min).min(max);
    }

    /// Map `position` onto the visible track
    pub fn update_display_x(&mut self, config: &RaceConfig) {
        let ratio = (self.position / config.track_length).min(1.0);
        let x = config.track_start_x + ratio * (config.display_max_x - config.track_start_x);
        self.display_x = x.max(config.display_min_x).min(config.display_max_x);
    }
}

/// Read-only per-frame view handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacerSnapshot {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub position: f32,
    pub display_x: f32,
    pub y: f32,
    pub base_y: f32,
    pub lane_height: f32,
    pub speed_multiplier: f32,
    pub current_speed: f32,
    pub sprinting: bool,
}

impl From<&Racer> for RacerSnapshot {
    fn from(racer: &Racer) -> Self {
        Self {
            id: racer.id,
            name: racer.name.clone(),
            color: racer.color.clone(),
            position: racer.position,
            display_x: racer.display_x,
            y: racer.y,
            base_y: racer.lane.base_y,
            lane_height: racer.lane.height,
            speed_multiplier: racer.speed_multiplier,
            current_speed: racer.current_speed,
            sprinting: racer.final_sprint_boost.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::SimRng;

    fn racer(acceleration_rate: f32) -> Racer {
        Racer::new(
            0,
            "A".into(),
            "#00ffff".into(),
            Lane {
                base_y: 400.0,
                height: 80.0,
            },
            Characteristics {
                base_speed_factor: 1.0,
                acceleration_rate,
                stamina: 1.0,
            },
        )
    }

    #[test]
    fn test_characteristics_within_configured_ranges() {
        let config = RaceConfig::default();
        let mut rng = SimRng::new(12345);
        for _ in 0..200 {
            let c = Characteristics::roll(&mut rng, &config);
            assert!((0.85..=1.15).contains(&c.base_speed_factor));
            assert!((0.08..=0.12).contains(&c.acceleration_rate));
            assert!((0.7..=1.0).contains(&c.stamina));
        }
    }

    #[test]
    fn test_ease_speed_moves_fraction_of_gap() {
        let mut r = racer(0.1);
        r.target_speed_multiplier = 2.0;
        r.ease_speed(0.4, 2.0);
        assert!((r.speed_multiplier - 1.1).abs() < 1e-6);

        // Higher acceleration closes more of the gap
        let mut fast = racer(0.5);
        fast.target_speed_multiplier = 2.0;
        fast.ease_speed(0.4, 2.0);
        assert!(fast.speed_multiplier > r.speed_multiplier);
    }

    #[test]
    fn test_display_x_maps_and_clamps() {
        let config = RaceConfig::default();
        let mut r = racer(0.1);

        r.update_display_x(&config);
        assert_eq!(r.display_x, config.track_start_x);

        r.position = config.track_length / 2.0;
        r.update_display_x(&config);
        assert!((r.display_x - 340.0).abs() < 1e-3);

        r.position = config.track_length * 10.0;
        r.update_display_x(&config);
        assert_eq!(r.display_x, config.display_max_x);

        r.position = -10_000.0;
        r.update_display_x(&config);
        assert_eq!(r.display_x, config.display_min_x);
    }

    #[test]
    fn test_snapshot_copies_render_fields() {
        let mut r = racer(0.1);
        r.final_sprint_boost = Some(1.7);
        let snap = RacerSnapshot::from(&r);
        assert_eq!(snap.name, "A");
        assert_eq!(snap.base_y, 400.0);
        assert!(snap.sprinting);
    }
}
