//! Quote ranking configuration.

use serde::{Deserialize, Serialize};

const fn default_swipe_threshold_px() -> f64 {
    100.0
}

const fn default_swipe_velocity() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotesConfig {
    /// Optional JSON file with quotes and candidates. Empty means the bundled deck.
    #[serde(default)]
    pub data_path: String,

    /// Horizontal drag distance (px) that commits a swipe.
    #[serde(default = "default_swipe_threshold_px")]
    pub swipe_threshold_px: f64,

    /// Release velocity (px/ms) that commits a swipe regardless of distance.
    #[serde(default = "default_swipe_velocity")]
    pub swipe_velocity: f64,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            data_path: String::new(),
            swipe_threshold_px: default_swipe_threshold_px(),
            swipe_velocity: default_swipe_velocity(),
        }
    }
}

impl QuotesConfig {
    /// Whether a custom quote file is configured.
    #[must_use]
    pub fn has_data_path(&self) -> bool {
        !self.data_path.is_empty()
    }
}
