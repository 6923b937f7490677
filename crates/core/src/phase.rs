//! The three-valued screen state machine.
//!
//! Exactly one [`Phase`] is active at a time. The orchestrators in
//! `safezone-pipeline` are the only writers; everything else reads a
//! snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::generation::GenerationResult;

/// Which content the television is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Keyword fields and the start trigger are visible.
    #[default]
    Input,
    /// The noise overlay is visible.
    Generating,
    /// The generated image and caption are visible.
    Viewing,
}

impl Phase {
    /// Lowercase wire name, as used in events and JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Input => "input",
            Phase::Generating => "generating",
            Phase::Viewing => "viewing",
        }
    }

    /// Whether the static/noise overlay is on screen.
    pub fn shows_noise(self) -> bool {
        self == Phase::Generating
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Derived screen flags
// ---------------------------------------------------------------------------

/// Whether the result layer should be visible.
///
/// True while viewing, and also while still generating once a result has
/// been stored: the result is then ready to cross-fade in behind the noise.
pub fn shows_result(phase: Phase, result: &GenerationResult) -> bool {
    match phase {
        Phase::Viewing => true,
        Phase::Generating => !result.image_url.is_empty(),
        Phase::Input => false,
    }
}

/// Whether the "wake up" (reset) control is offered.
pub fn shows_reset(phase: Phase, result: &GenerationResult) -> bool {
    shows_result(phase, result)
}
