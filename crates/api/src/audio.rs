//! Audio output that plays through the attached screens.
//!
//! The server has no speakers: a play request becomes an `AudioCue` event
//! that every attached screen receives over the WebSocket. With no screen
//! attached the play is refused, which the deck logs and swallows.

use std::sync::{Arc, OnceLock};

use safezone_core::audio::AudioCue;
use safezone_pipeline::{AudioError, AudioOutput, TvEventBus, TvEventKind};

use crate::ws::WsManager;

pub struct ScreenAudio {
    ws_manager: Arc<WsManager>,
    bus: Arc<TvEventBus>,
    volume: OnceLock<f32>,
}

impl ScreenAudio {
    pub fn new(ws_manager: Arc<WsManager>, bus: Arc<TvEventBus>) -> Self {
        Self {
            ws_manager,
            bus,
            volume: OnceLock::new(),
        }
    }

    /// The volume fixed at acquisition, if any.
    pub fn volume(&self) -> Option<f32> {
        self.volume.get().copied()
    }
}

impl AudioOutput for ScreenAudio {
    fn set_volume(&self, volume: f32) {
        if self.volume.set(volume).is_err() {
            tracing::warn!(volume, "Audio volume already fixed, ignoring");
        }
    }

    fn play(&self, cue: &AudioCue) -> Result<(), AudioError> {
        if !self.ws_manager.has_listeners() {
            return Err(AudioError::NoListener);
        }
        let mut cue = cue.clone();
        if let Some(volume) = self.volume() {
            cue.volume = volume;
        }
        self.bus.publish(TvEventKind::AudioCue { cue });
        Ok(())
    }
}
