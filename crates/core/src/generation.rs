//! The paired output of one generation cycle, and its timing constants.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Timing defaults
// ---------------------------------------------------------------------------

/// Delay between storing a result and fading the noise out (milliseconds).
///
/// Gives the new image a render frame behind the overlay.
pub const DEFAULT_VIEW_SETTLE_MS: u64 = 500;

/// Delay between a reset trigger and the cleared input screen (milliseconds).
pub const DEFAULT_RESET_DELAY_MS: u64 = 600;

/// Presentation delays used by the orchestrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub view_settle: Duration,
    pub reset_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            view_settle: Duration::from_millis(DEFAULT_VIEW_SETTLE_MS),
            reset_delay: Duration::from_millis(DEFAULT_RESET_DELAY_MS),
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationResult
// ---------------------------------------------------------------------------

/// Image URL and caption produced together by one successful generation.
///
/// Both fields are empty until the first success and are always written as
/// a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub image_url: String,
    pub caption: String,
}

impl GenerationResult {
    pub fn new(image_url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            caption: caption.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image_url.is_empty() && self.caption.is_empty()
    }

    pub fn clear(&mut self) {
        self.image_url.clear();
        self.caption.clear();
    }
}
