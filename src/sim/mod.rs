//! Race simulation module
//!
//! All race logic lives here. This module must stay platform-free:
//! - Frame-rate independent (delta-time integration)
//! - Randomness only through `RandomSource`
//! - Stable iteration order (by racer id)
//! - No rendering or platform dependencies

pub mod clock;
pub mod layout;
pub mod physics;
pub mod racer;
pub mod random;
pub mod results;
pub mod roster;
pub mod state;

pub use clock::{FrameTime, RaceClock};
pub use layout::{Lane, lane_layout};
pub use physics::{RacePhysics, fairness_factor};
pub use racer::{Characteristics, Racer, RacerSnapshot};
pub use random::{RandomSource, SimRng, chance, entropy_seed, uniform, uniform_from_base};
pub use results::{Finisher, Podium, rank_finishers};
pub use roster::{Participant, validate_roster};
pub use state::RaceState;
