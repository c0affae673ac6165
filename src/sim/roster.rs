//! Participant roster intake

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// A raffle entrant as handed over by the participant manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Check a roster and return the names in entry order.
///
/// One blank name invalidates the whole roster. Names are returned as
/// given, untrimmed.
pub fn validate_roster(roster: &[Participant]) -> Result<Vec<&str>, RosterError> {
    if roster.is_empty() {
        return Err(RosterError::Empty);
    }

    roster
        .iter()
        .enumerate()
        .map(|(index, p)| {
            if p.name.trim().is_empty() {
                Err(RosterError::BlankName { index })
            } else {
                Ok(p.name.as_str())
            }
        })
        .collect()
}
