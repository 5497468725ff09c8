//! Turning a card drag into a swipe decision.

use serde::{Deserialize, Serialize};
use tally_config::QuotesConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    /// Reject the quote.
    Left,
    /// Agree with the quote.
    Right,
}

impl SwipeDirection {
    #[must_use]
    pub const fn is_agree(self) -> bool {
        matches!(self, Self::Right)
    }

    fn from_sign(value: f64) -> Self {
        if value < 0.0 { Self::Left } else { Self::Right }
    }
}

/// Distance and flick-speed thresholds for committing a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThresholds {
    pub distance_px: f64,
    pub velocity: f64,
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self::from_config(&QuotesConfig::default())
    }
}

impl DragThresholds {
    #[must_use]
    pub const fn from_config(config: &QuotesConfig) -> Self {
        Self {
            distance_px: config.swipe_threshold_px,
            velocity: config.swipe_velocity,
        }
    }

    /// Decide what a released drag means.
    ///
    /// Distance wins over velocity; `None` means the card snaps back.
    #[must_use]
    pub fn resolve(&self, offset_x: f64, velocity_x: f64) -> Option<SwipeDirection> {
        if offset_x.abs() >= self.distance_px {
            Some(SwipeDirection::from_sign(offset_x))
        } else if velocity_x.abs() >= self.velocity {
            Some(SwipeDirection::from_sign(velocity_x))
        } else {
            None
        }
    }
}
