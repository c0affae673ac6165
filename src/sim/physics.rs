//! Race physics
//!
//! Frame-rate independent race update. Decisions and integration run on
//! different clocks:
//! - Target multipliers are re-rolled on a per-racer schedule, at most one
//!   pass per `speed_refresh_interval_ms` of logical race time
//! - Positions integrate every frame with `position += speed * delta`
//!
//! Nothing here picks a winner. Outcomes come from the per-racer
//! characteristics, the random bursts, a weak rubber band and a single
//! final-sprint surge handed to a chaser.

use super::racer::{Racer, RacerSnapshot};
use super::random::{RandomSource, SimRng, chance, uniform_from_base};
use super::results::{Podium, rank_finishers};
use super::roster::{Participant, validate_roster};
use super::state::RaceState;
use crate::consts::FINAL_SPRINT_MAX_RANK;
use crate::settings::RaceConfig;

/// Race engine. Owns the racers; callers get read-only views back.
#[derive(Debug, Clone)]
pub struct RacePhysics<R: RandomSource = SimRng> {
    config: RaceConfig,
    state: RaceState,
    rng: R,
}

impl RacePhysics<SimRng> {
    /// Engine with an entropy-seeded RNG
    pub fn new(config: RaceConfig) -> Self {
        Self::with_rng(config, SimRng::from_entropy())
    }

    /// Engine with a fixed seed (replays, tests)
    pub fn seeded(config: RaceConfig, seed: u64) -> Self {
        Self::with_rng(config, SimRng::new(seed))
    }
}

impl Default for RacePhysics<SimRng> {
    fn default() -> Self {
        Self::new(RaceConfig::default())
    }
}

impl<R: RandomSource> RacePhysics<R> {
    pub fn with_rng(config: RaceConfig, rng: R) -> Self {
        Self {
            config,
            state: RaceState::new(),
            rng,
        }
    }

    /// Line up a new field at the start.
    ///
    /// An empty roster, or any participant with a blank name, yields a race
    /// with no racers rather than an error.
    pub fn initialize(&mut self, roster: &[Participant]) -> &[Racer] {
        match validate_roster(roster) {
            Ok(names) => {
                self.state.populate(&names, &self.config, &mut self.rng);
                log::info!("Race initialized with {} racers", self.state.len());
            }
            Err(e) => {
                log::warn!("Invalid roster ({}), starting with no racers", e);
                self.state.clear();
            }
        }
        &self.state.racers
    }

    /// Same as `initialize`; discards the previous run entirely
    pub fn reset(&mut self, roster: &[Participant]) {
        self.initialize(roster);
    }

    /// Advance the race by one frame.
    ///
    /// `elapsed` is seconds since the start, `delta` seconds since the
    /// previous frame. Callers keep `elapsed` non-decreasing and `delta >= 0`.
    pub fn update(&mut self, elapsed: f32, delta: f32) -> &[Racer] {
        let now_ms = elapsed * 1000.0;
        let refresh_due = self
            .state
            .last_speed_update_ms
            .is_none_or(|last| now_ms - last > self.config.speed_refresh_interval_ms);
        // The refresh cadence can step straight over the sprint window
        let sprint_pending = !self.state.final_sprint_triggered
            && self.config.in_final_sprint(self.fraction(elapsed));

        if refresh_due || sprint_pending {
            self.refresh_targets(elapsed);
            self.state.last_speed_update_ms = Some(now_ms);
        }

        let average = self.state.average_position();
        let config = &self.config;
        let rng = &mut self.rng;

        for racer in &mut self.state.racers {
            racer.ease_speed(config.min_speed_multiplier, config.max_speed_multiplier);

            let adjustment = fairness_factor(racer.position, average, config, rng);
            let effective = config.base_speed * racer.speed_multiplier * adjustment;
            racer.current_speed = effective;
            racer.position += effective * delta;
            racer.update_display_x(config);

            if chance(rng, config.vertical_jitter_chance) {
                let y = racer.y + (rng.next_unit() - 0.5) * config.vertical_jitter;
                racer.y = racer.lane.contain(y, config.lane_padding);
            }
        }

        &self.state.racers
    }

    /// Re-roll target multipliers for every racer whose schedule is due.
    ///
    /// Also hands out the final sprint the first time progress lands in the
    /// sprint window.
    pub fn refresh_targets(&mut self, elapsed: f32) {
        let now_ms = elapsed * 1000.0;
        let progress = self.fraction(elapsed);

        if self.config.in_final_sprint(progress) {
            self.trigger_final_sprint(elapsed);
        }

        let config = &self.config;
        let rng = &mut self.rng;

        for racer in self
            .state
            .racers
            .iter_mut()
            .filter(|r| now_ms >= r.next_speed_change_at_ms)
        {
            let mut target = racer.traits.base_speed_factor;
            target *= uniform_from_base(rng, config.speed_burst_base, config.speed_burst_range);

            if progress > config.late_race_threshold {
                target *= racer.traits.stamina
                    * uniform_from_base(
                        rng,
                        config.stamina_effect_base,
                        config.stamina_effect_range,
                    );
            }

            if let Some(boost) = racer.final_sprint_boost {
                target *= boost;
            }

            racer.target_speed_multiplier = target
                .max(config.min_speed_multiplier)
                .min(config.max_speed_multiplier);
            racer.next_speed_change_at_ms = now_ms
                + uniform_from_base(
                    rng,
                    config.speed_change_base_ms,
                    config.speed_change_range_ms,
                );

            log::trace!(
                "{} target x{:.2} until {:.0}ms",
                racer.name,
                racer.target_speed_multiplier,
                racer.next_speed_change_at_ms
            );
        }
    }

    /// Give one of the chasers (2nd to 4th) a surge. Fires at most once per
    /// race; returns the lucky racer's id.
    pub fn trigger_final_sprint(&mut self, elapsed: f32) -> Option<u32> {
        if self.state.final_sprint_triggered {
            return None;
        }
        self.state.final_sprint_triggered = true;

        let standings = self.state.standings();
        let end = standings.len().min(FINAL_SPRINT_MAX_RANK);
        if end < 2 {
            return None;
        }
        let candidates = &standings[1..end];

        let pick = ((self.rng.next_unit() * candidates.len() as f32) as usize)
            .min(candidates.len() - 1);
        let boost = uniform_from_base(
            &mut self.rng,
            self.config.final_sprint_boost_base,
            self.config.final_sprint_boost_range,
        );

        let racer = &mut self.state.racers[candidates[pick]];
        racer.final_sprint_boost = Some(boost);
        // Re-roll now so the surge lands before the flag
        racer.next_speed_change_at_ms = elapsed * 1000.0;

        log::debug!(
            "Final sprint: {} (id {}) surges x{:.2}",
            racer.name,
            racer.id,
            boost
        );
        Some(racer.id)
    }

    /// Rubber-band multiplier for one racer against the current field.
    /// Includes the per-tick random texture, so each call draws from the RNG.
    pub fn fairness_adjustment(&mut self, index: usize) -> f32 {
        let average = self.state.average_position();
        match self.state.racers.get(index) {
            Some(racer) => fairness_factor(racer.position, average, &self.config, &mut self.rng),
            None => 1.0,
        }
    }

    /// Top three by position. Call once `elapsed >= race_duration`.
    pub fn determine_winners(&self) -> Podium {
        let podium = rank_finishers(&self.state.racers, self.config.race_duration);
        if let Some(winner) = podium.winner() {
            log::info!(
                "Race winner: {} (id {}) at {:.1}",
                winner.name,
                winner.id,
                winner.position
            );
        }
        podium
    }

    pub fn racers(&self) -> &[Racer] {
        &self.state.racers
    }

    /// Owned copies for the renderer
    pub fn snapshot(&self) -> Vec<RacerSnapshot> {
        self.state.racers.iter().map(RacerSnapshot::from).collect()
    }

    /// Current leader; ties go to the earlier entrant
    pub fn leader(&self) -> Option<&Racer> {
        self.state
            .standings()
            .first()
            .map(|&i| &self.state.racers[i])
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// HUD progress in [0, 1]
    pub fn progress(&self, elapsed: f32) -> f32 {
        self.config.progress(elapsed)
    }

    pub fn time_remaining(&self, elapsed: f32) -> f32 {
        (self.config.race_duration - elapsed).max(0.0)
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.config.race_duration
    }

    /// Unclamped fraction of the race elapsed
    fn fraction(&self, elapsed: f32) -> f32 {
        if self.config.race_duration > 0.0 {
            elapsed / self.config.race_duration
        } else {
            1.0
        }
    }
}

/// Weak rubber band: +catch-up when well behind the mean, -penalty when
/// well ahead, always times a small symmetric random factor. Never
/// strong enough to dictate the finish order.
pub fn fairness_factor<R: RandomSource + ?Sized>(
    position: f32,
    average: f32,
    config: &RaceConfig,
    rng: &mut R,
) -> f32 {
    let band = config.position_threshold_distance * 2.0;
    let mut adjustment = 1.0;

    if position < average - band {
        adjustment *= config.catch_up_factor;
    } else if position > average + band {
        adjustment *= config.lead_penalty_factor;
    }

    adjustment * (1.0 + (rng.next_unit() - 0.5) * config.fairness_random_variance)
}
