//! The single looping background track.

use serde::{Deserialize, Serialize};

/// Erik Satie, Gymnopedie No. 1 (public domain recording).
pub const DEFAULT_TRACK_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/3/35/Gymnopedie_No_1.ogg";

/// Playback volume, fixed once at startup.
pub const DEFAULT_VOLUME: f32 = 0.4;

/// Everything a screen needs to play the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioCue {
    pub track_url: String,
    pub volume: f32,
    pub looping: bool,
    /// Seek to zero before playing (set when the track had ended).
    pub restart: bool,
}

impl AudioCue {
    pub fn new(track_url: impl Into<String>, volume: f32) -> Self {
        Self {
            track_url: track_url.into(),
            volume: volume.clamp(0.0, 1.0),
            looping: true,
            restart: false,
        }
    }
}

impl Default for AudioCue {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_URL, DEFAULT_VOLUME)
    }
}
