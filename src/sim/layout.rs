//! Lane layout
//!
//! Racers share the lower band of the canvas. Each gets an equal slice,
//! capped at `max_lane_height`; when the cap kicks in the whole block is
//! centred in the band instead of stretched across it.

use serde::{Deserialize, Serialize};

use crate::settings::RaceConfig;

/// Vertical slice of the canvas owned by one racer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    /// Lane centreline
    pub base_y: f32,
    /// Full lane height
    pub height: f32,
}

impl Lane {
    /// Allowed `y` range after padding. Padding shrinks on lanes too narrow
    /// to hold it, down to the centreline itself.
    ///
    /// When `height < 2 * padding` the nominal `[top + padding, bottom - padding]`
    /// interval is empty, so the result is the single point `(base_y, base_y)`.
    pub fn bounds(&self, padding: f32) -> (f32, f32) {
        let half = (self.height / 2.0).max(0.0);
        let pad = padding.clamp(0.0, half);
        (self.base_y - half + pad, self.base_y + half - pad)
    }

    /// Clamp `y` into the padded lane
    #[inline]
    pub fn contain(&self, y: f32, padding: f32) -> f32 {
        let (min, max) = self.bounds(padding);
        y.max(min).min(max)
    }
}

/// Lay out `count` lanes top to bottom in entry order
pub fn lane_layout(count: usize, config: &RaceConfig) -> Vec<Lane> {
    let top = config.canvas_height * config.race_area_top_fraction;
    let available = (config.canvas_height - top - config.race_area_bottom_padding).max(0.0);

    let natural = available / count.max(1) as f32;
    let height = natural.min(config.max_lane_height);
    let block = height * count as f32;
    let offset = top + (available - block) / 2.0;

    (0..count)
        .map(|i| Lane {
            base_y: offset + height / 2.0 + i as f32 * height,
            height,
        })
        .collect()
}
