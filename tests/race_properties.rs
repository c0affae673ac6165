//! Property tests for the race engine invariants

use duck_race::sim::{Participant, RacePhysics};
use duck_race::RaceConfig;
use proptest::prelude::*;

fn roster(count: usize) -> Vec<Participant> {
    (0..count).map(|i| Participant::new(format!("Duck {}", i))).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn positions_never_decrease(
        seed in any::<u64>(),
        count in 1usize..12,
        deltas in prop::collection::vec(0.0f32..0.1, 50..400),
    ) {
        let mut engine = RacePhysics::seeded(RaceConfig::default(), seed);
        engine.initialize(&roster(count));

        let mut elapsed = 0.0;
        let mut previous: Vec<f32> = engine.racers().iter().map(|r| r.position).collect();
        for delta in deltas {
            elapsed += delta;
            let racers = engine.update(elapsed, delta);
            for (racer, prev) in racers.iter().zip(previous.iter_mut()) {
                prop_assert!(racer.position >= *prev);
                *prev = racer.position;
            }
        }
    }

    #[test]
    fn multipliers_stay_clamped(seed in any::<u64>(), count in 1usize..12) {
        let config = RaceConfig::default();
        let (min, max) = (config.min_speed_multiplier, config.max_speed_multiplier);
        let mut engine = RacePhysics::seeded(config, seed);
        engine.initialize(&roster(count));

        for i in 1..=1000 {
            let elapsed = i as f32 / 60.0;
            for racer in engine.update(elapsed, 1.0 / 60.0) {
                prop_assert!(racer.speed_multiplier >= min && racer.speed_multiplier <= max);
                prop_assert!(
                    racer.target_speed_multiplier >= min && racer.target_speed_multiplier <= max
                );
            }
        }
    }

    #[test]
    fn racers_stay_in_their_lanes(seed in any::<u64>(), count in 1usize..30) {
        // Jitter every tick to stress the clamp
        let config = RaceConfig {
            vertical_jitter_chance: 1.0,
            vertical_jitter: 40.0,
            ..RaceConfig::default()
        };
        let padding = config.lane_padding;
        let mut engine = RacePhysics::seeded(config, seed);
        engine.initialize(&roster(count));

        for i in 1..=600 {
            for racer in engine.update(i as f32 / 60.0, 1.0 / 60.0) {
                let (lo, hi) = racer.lane.bounds(padding);
                prop_assert!(racer.y >= lo && racer.y <= hi);
                if racer.lane.height >= 2.0 * padding {
                    prop_assert!(racer.y >= racer.lane.base_y - racer.lane.height / 2.0 + padding - 1e-3);
                    prop_assert!(racer.y <= racer.lane.base_y + racer.lane.height / 2.0 - padding + 1e-3);
                }
            }
        }
    }

    #[test]
    fn final_sprint_awarded_at_most_once(seed in any::<u64>(), count in 1usize..10) {
        let mut engine = RacePhysics::seeded(RaceConfig::default(), seed);
        engine.initialize(&roster(count));

        let mut awarded: Option<(u32, f32)> = None;
        for i in 1..=1200 {
            let racers = engine.update(i as f32 / 60.0, 1.0 / 60.0);
            let boosted: Vec<(u32, f32)> = racers
                .iter()
                .filter_map(|r| r.final_sprint_boost.map(|b| (r.id, b)))
                .collect();
            prop_assert!(boosted.len() <= 1);

            if let Some(&current) = boosted.first() {
                if let Some(first) = awarded {
                    prop_assert_eq!(first, current);
                }
                awarded = Some(current);
            }
        }

        prop_assert_eq!(awarded.is_some(), count >= 2);
    }

    #[test]
    fn reset_keeps_identity_assignment(seed in any::<u64>(), count in 1usize..10) {
        let names = roster(count);
        let mut engine = RacePhysics::seeded(RaceConfig::default(), seed);
        engine.initialize(&names);
        let identity = |e: &RacePhysics| -> Vec<(u32, String, String)> {
            e.racers().iter().map(|r| (r.id, r.name.clone(), r.color.clone())).collect()
        };
        let before = identity(&engine);

        for i in 1..=300 {
            engine.update(i as f32 / 60.0, 1.0 / 60.0);
        }
        engine.reset(&names);

        prop_assert_eq!(before, identity(&engine));
        prop_assert!(engine.racers().iter().all(|r| r.position == 0.0));
        prop_assert!(!engine.state().final_sprint_triggered);
    }
}
