//! The process-wide background-track handle.
//!
//! [`AudioDeck`] is acquired once at startup, fixes the volume on its
//! [`AudioOutput`], and exposes idempotent `play`. Playback rejections are
//! logged and swallowed; they never reach the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use safezone_core::audio::AudioCue;

/// Why an output refused to play.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// The playback environment refused (e.g. an autoplay policy).
    #[error("Playback rejected: {0}")]
    Rejected(String),

    /// No screen is attached to play the track.
    #[error("No screen attached to play audio")]
    NoListener,
}

/// Something that can actually play the track.
pub trait AudioOutput: Send + Sync + 'static {
    /// Called exactly once, from [`AudioDeck::acquire`].
    fn set_volume(&self, volume: f32);

    /// Start (or continue) playback as described by `cue`.
    fn play(&self, cue: &AudioCue) -> Result<(), AudioError>;
}

/// Single shared handle to the looping background track.
pub struct AudioDeck {
    output: Arc<dyn AudioOutput>,
    cue: AudioCue,
    ended: AtomicBool,
}

impl AudioDeck {
    /// Take ownership of the output and fix the volume.
    pub fn acquire(output: Arc<dyn AudioOutput>, cue: AudioCue) -> Self {
        output.set_volume(cue.volume);
        tracing::debug!(track = %cue.track_url, volume = cue.volume, "Audio deck acquired");
        Self {
            output,
            cue,
            ended: AtomicBool::new(false),
        }
    }

    /// The cue a screen should use when it first attaches.
    pub fn cue(&self) -> &AudioCue {
        &self.cue
    }

    /// Record that the track ran to its end; the next play rewinds to zero.
    pub fn mark_ended(&self) {
        self.ended.store(true, Ordering::Release);
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::Acquire)
    }

    /// Start playback, rewinding first if the track had ended.
    ///
    /// Never fails: a rejected play is logged as a warning.
    pub fn play(&self) {
        let mut cue = self.cue.clone();
        cue.restart = self.ended.swap(false, Ordering::AcqRel);

        if let Err(e) = self.output.play(&cue) {
            tracing::warn!(error = %e, "Audio autoplay blocked or failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recording {
        volumes: Mutex<Vec<f32>>,
        plays: Mutex<Vec<AudioCue>>,
        reject: bool,
    }

    impl AudioOutput for Recording {
        fn set_volume(&self, volume: f32) {
            self.volumes.lock().unwrap().push(volume);
        }

        fn play(&self, cue: &AudioCue) -> Result<(), AudioError> {
            self.plays.lock().unwrap().push(cue.clone());
            if self.reject {
                Err(AudioError::Rejected("autoplay policy".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn volume_is_set_once_at_acquire() {
        let out = Arc::new(Recording::default());
        let deck = AudioDeck::acquire(out.clone(), AudioCue::default());
        deck.play();
        deck.play();
        assert_eq!(*out.volumes.lock().unwrap(), vec![0.4]);
    }

    #[test]
    fn play_is_idempotent_and_does_not_restart_a_running_track() {
        let out = Arc::new(Recording::default());
        let deck = AudioDeck::acquire(out.clone(), AudioCue::default());
        deck.play();
        deck.play();
        let plays = out.plays.lock().unwrap();
        assert_eq!(plays.len(), 2);
        assert!(plays.iter().all(|c| !c.restart));
    }

    #[test]
    fn ended_track_restarts_from_zero_once() {
        let out = Arc::new(Recording::default());
        let deck = AudioDeck::acquire(out.clone(), AudioCue::default());
        deck.mark_ended();
        assert!(deck.is_ended());

        deck.play();
        deck.play();

        let plays = out.plays.lock().unwrap();
        assert!(plays[0].restart);
        assert!(!plays[1].restart);
        assert!(!deck.is_ended());
    }

    #[test]
    fn rejected_play_is_swallowed() {
        let out = Arc::new(Recording {
            reject: true,
            ..Recording::default()
        });
        let deck = AudioDeck::acquire(out.clone(), AudioCue::default());
        deck.play();
        assert_eq!(out.plays.lock().unwrap().len(), 1);
    }
}
