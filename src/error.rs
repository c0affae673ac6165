//! Error types for roster intake and configuration loading.
//!
//! The simulation tick itself is infallible; these errors only surface at
//! the edges where untrusted input (participant lists, JSON tuning) enters.

use thiserror::Error;

/// Why a participant roster was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("roster is empty")]
    Empty,

    #[error("participant at index {index} has a blank name")]
    BlankName { index: usize },
}

/// Why a race configuration could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse race config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read race config: {0}")]
    Io(#[from] std::io::Error),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{field} must be within [0, 1], got {value}")]
    NotAFraction { field: &'static str, value: f32 },

    #[error("{field} must be within [{min}, {max}), got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("color palette is empty")]
    EmptyPalette,
}
