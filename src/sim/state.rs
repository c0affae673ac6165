//! Race state container
//!
//! Owns the roster of racers and the run-level bookkeeping. Created empty,
//! filled by `populate`, wiped by `clear`.

use serde::{Deserialize, Serialize};

use super::layout::lane_layout;
use super::racer::{Characteristics, Racer};
use super::random::{RandomSource, uniform_from_base};
use crate::settings::RaceConfig;

/// Everything that belongs to one race run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceState {
    /// Racers in entry order (index == id)
    pub racers: Vec<Racer>,
    /// Logical time (ms) of the last target re-roll pass
    pub last_speed_update_ms: Option<f32>,
    /// Latched once the final sprint has been handed out
    pub final_sprint_triggered: bool,
}

impl RaceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all racers and scheduling
    pub fn clear(&mut self) {
        self.racers.clear();
        self.last_speed_update_ms = None;
        self.final_sprint_triggered = false;
    }

    /// Replace the field with fresh racers at the start line
    pub fn populate<R: RandomSource + ?Sized>(
        &mut self,
        names: &[&str],
        config: &RaceConfig,
        rng: &mut R,
    ) {
        self.clear();

        let lanes = lane_layout(names.len(), config);
        let palette_len = config.palette.len().max(1);

        self.racers = names
            .iter()
            .zip(lanes)
            .enumerate()
            .map(|(index, (name, lane))| {
                let color = config
                    .palette
                    .get(index % palette_len)
                    .cloned()
                    .unwrap_or_default();
                let traits = Characteristics::roll(rng, config);
                let mut racer = Racer::new(index as u32, name.to_string(), color, lane, traits);
                racer.next_speed_change_at_ms = uniform_from_base(
                    rng,
                    config.speed_change_base_ms,
                    config.speed_change_range_ms,
                );
                racer.update_display_x(config);
                racer
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.racers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.racers.is_empty()
    }

    /// Mean position across the field (0 when empty)
    pub fn average_position(&self) -> f32 {
        if self.racers.is_empty() {
            return 0.0;
        }
        self.racers.iter().map(|r| r.position).sum::<f32>() / self.racers.len() as f32
    }

    /// Indices of racers ordered by position, leader first. Ties keep entry order.
    pub fn standings(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.racers.len()).collect();
        order.sort_by(|&a, &b| {
            self.racers[b]
                .position
                .partial_cmp(&self.racers[a].position)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::SimRng;

    #[test]
    fn test_populate_assigns_ids_colors_and_schedule() {
        let config = RaceConfig::default();
        let mut rng = SimRng::new(1);
        let mut state = RaceState::new();
        let names: Vec<&str> = (0..8).map(|_| "x").collect();
        state.populate(&names, &config, &mut rng);

        assert_eq!(state.len(), 8);
        for (i, racer) in state.racers.iter().enumerate() {
            assert_eq!(racer.id, i as u32);
            assert_eq!(racer.color, config.palette[i % config.palette.len()]);
            assert_eq!(racer.position, 0.0);
            assert_eq!(racer.speed_multiplier, 1.0);
            assert_eq!(racer.target_speed_multiplier, 1.0);
            assert!(racer.final_sprint_boost.is_none());
            assert!((1000.0..=3000.0).contains(&racer.next_speed_change_at_ms));
            assert_eq!(racer.y, racer.lane.base_y);
        }
        // Palette wraps around
        assert_eq!(state.racers[6].color, state.racers[0].color);
    }

    #[test]
    fn test_clear_resets_run_bookkeeping() {
        let config = RaceConfig::default();
        let mut rng = SimRng::new(2);
        let mut state = RaceState::new();
        state.populate(&["A", "B"], &config, &mut rng);
        state.last_speed_update_ms = Some(4000.0);
        state.final_sprint_triggered = true;

        state.clear();
        assert!(state.is_empty());
        assert!(state.last_speed_update_ms.is_none());
        assert!(!state.final_sprint_triggered);
    }

    #[test]
    fn test_standings_and_average() {
        let config = RaceConfig::default();
        let mut rng = SimRng::new(3);
        let mut state = RaceState::new();
        state.populate(&["A", "B", "C", "D"], &config, &mut rng);
        for (racer, pos) in state.racers.iter_mut().zip([10.0, 30.0, 20.0, 30.0]) {
            racer.position = pos;
        }

        assert_eq!(state.standings(), vec![1, 3, 2, 0]);
        assert!((state.average_position() - 22.5).abs() < 1e-6);
        assert_eq!(RaceState::new().average_position(), 0.0);
    }
}
