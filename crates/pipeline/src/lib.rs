//! The SAFE ZONE presentation sequence.
//!
//! [`tv::Tv`] owns the screen state and runs the two orchestrators:
//! generation (audio, noise, caption + image in parallel, result, view) and
//! reset (noise, then a cleared input screen). Every state change is also
//! published on the [`events::TvEventBus`].

pub mod audio;
pub mod error;
pub mod events;
pub mod state;
pub mod tv;

pub use audio::{AudioDeck, AudioError, AudioOutput};
pub use error::PipelineError;
pub use events::{TvEvent, TvEventBus, TvEventKind};
pub use state::{TvSnapshot, TvState};
pub use tv::{GenerationOutcome, ResetOutcome, Tv};
