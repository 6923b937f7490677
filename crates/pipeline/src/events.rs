//! In-process screen event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`TvEventBus`] fans out every state change of the television to any
//! number of subscribers (the WebSocket relay, tests). It is shared via
//! `Arc<TvEventBus>`.

use chrono::Utc;
use safezone_core::audio::AudioCue;
use safezone_core::generation::GenerationResult;
use safezone_core::keywords::KeywordSet;
use safezone_core::phase::Phase;
use safezone_core::types::{GenerationId, Timestamp};
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// TvEvent
// ---------------------------------------------------------------------------

/// What changed on the screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TvEventKind {
    /// The phase moved. `generation` is the trigger that caused it.
    PhaseChanged {
        phase: Phase,
        generation: GenerationId,
    },
    /// One or more keyword fields were edited or cleared.
    KeywordsChanged { keywords: KeywordSet },
    /// A result was stored and may cross-fade in behind the noise.
    ResultReady {
        generation: GenerationId,
        result: GenerationResult,
    },
    /// The attached screen should (re)start the background track.
    AudioCue { cue: AudioCue },
}

/// A timestamped [`TvEventKind`].
#[derive(Debug, Clone, Serialize)]
pub struct TvEvent {
    #[serde(flatten)]
    pub kind: TvEventKind,
    /// When the event was created (UTC).
    pub timestamp: Timestamp,
}

impl TvEvent {
    pub fn new(kind: TvEventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// TvEventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out bus for [`TvEvent`]s.
pub struct TvEventBus {
    sender: broadcast::Sender<TvEvent>,
}

impl TvEventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers observe `RecvError::Lagged` once the buffer is full.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently if there are none.
    pub fn publish(&self, kind: TvEventKind) {
        let _ = self.sender.send(TvEvent::new(kind));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TvEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TvEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
