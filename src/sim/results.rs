//! Podium extraction

use serde::{Deserialize, Serialize};

use super::racer::Racer;

/// A placed racer at the end of the race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finisher {
    pub id: u32,
    pub name: String,
    pub color: String,
    /// 1-based place
    pub place: u32,
    pub position: f32,
    /// Race duration (seconds); everyone races the same clock
    pub time: f32,
    /// Rounded position per second
    pub avg_speed: f32,
}

/// Top three; missing places stay `None` on short rosters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Podium {
    pub first: Option<Finisher>,
    pub second: Option<Finisher>,
    pub third: Option<Finisher>,
}

impl Podium {
    /// Placed finishers, best first
    pub fn finishers(&self) -> impl Iterator<Item = &Finisher> {
        [&self.first, &self.second, &self.third]
            .into_iter()
            .flatten()
    }

    pub fn winner(&self) -> Option<&Finisher> {
        self.first.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// Rank racers by position, highest first.
///
/// Works on a copy of the references, so the caller's order is untouched.
/// The sort is stable: exact ties go to the earlier entrant.
pub fn rank_finishers(racers: &[Racer], race_duration: f32) -> Podium {
    let mut ranked: Vec<&Racer> = racers.iter().collect();
    ranked.sort_by(|a, b| {
        b.position
            .partial_cmp(&a.position)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let finisher = |place: usize| {
        ranked.get(place).map(|racer| Finisher {
            id: racer.id,
            name: racer.name.clone(),
            color: racer.color.clone(),
            place: place as u32 + 1,
            position: racer.position,
            time: race_duration,
            avg_speed: if race_duration > 0.0 {
                (racer.position / race_duration).round()
            } else {
                0.0
            },
        })
    };

    Podium {
        first: finisher(0),
        second: finisher(1),
        third: finisher(2),
    }
}
