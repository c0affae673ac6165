//! Frame clock
//!
//! Converts host animation-frame timestamps into the `(elapsed, delta)`
//! pair the engine integrates with. Deltas are capped so a stalled or
//! backgrounded tab resumes where it left off instead of jumping ahead;
//! `elapsed` is the sum of the capped deltas.

use crate::consts::MAX_FRAME_DELTA;

/// Timing for one frame, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub elapsed: f32,
    pub delta: f32,
}

#[derive(Debug, Clone)]
pub struct RaceClock {
    last_ms: Option<f64>,
    elapsed: f32,
    max_delta: f32,
}

impl Default for RaceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceClock {
    pub fn new() -> Self {
        Self::with_max_delta(MAX_FRAME_DELTA)
    }

    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last_ms: None,
            elapsed: 0.0,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Advance to `now_ms` (monotonic milliseconds). The first call starts the race.
    pub fn frame(&mut self, now_ms: f64) -> FrameTime {
        let delta = match self.last_ms {
            None => 0.0,
            Some(last) => (((now_ms - last) / 1000.0) as f32).max(0.0).min(self.max_delta),
        };
        self.last_ms = Some(now_ms);
        self.elapsed += delta;

        FrameTime {
            elapsed: self.elapsed,
            delta,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.last_ms.is_some()
    }

    /// Stop and rewind to zero
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.elapsed = 0.0;
    }
}
