//! Generation and reset orchestrators.
//!
//! Both triggers are split in two halves. The synchronous half runs inside
//! the call itself (audio, phase change, token claim), so the noise is on
//! screen before anything is awaited. The returned future holds the
//! asynchronous half and may be awaited or spawned.
//!
//! Each trigger claims a new generation token. A completion checks its
//! token before touching state, so when triggers overlap only the latest
//! one decides the final screen.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use safezone_core::collaborators::{CaptionWriter, ImageSource};
use safezone_core::error::CoreError;
use safezone_core::generation::{GenerationResult, Timings};
use safezone_core::keywords::{KeywordSet, KeywordSlot, ResolvedKeywords};
use safezone_core::phase::Phase;
use safezone_core::types::GenerationId;

use crate::audio::AudioDeck;
use crate::error::PipelineError;
use crate::events::{TvEventBus, TvEventKind};
use crate::state::{TvSnapshot, TvState};

/// How a generation ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The result is on screen.
    Viewing(GenerationResult),
    /// A later start or reset took over; this run's output was discarded.
    Superseded,
}

/// How a reset ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Cleared,
    /// A start arrived during the reset delay and took over.
    Superseded,
}

/// The television: state holder plus both orchestrators.
pub struct Tv<C, I> {
    state: Mutex<TvState>,
    captions: C,
    images: I,
    deck: AudioDeck,
    bus: Arc<TvEventBus>,
    timings: Timings,
}

impl<C, I> Tv<C, I>
where
    C: CaptionWriter,
    I: ImageSource,
{
    /// Build an idle television showing the input screen.
    pub fn new(captions: C, images: I, deck: AudioDeck, bus: Arc<TvEventBus>, timings: Timings) -> Self {
        Self {
            state: Mutex::new(TvState::default()),
            captions,
            images,
            deck,
            bus,
            timings,
        }
    }

    /// Copy of the current screen state.
    pub fn snapshot(&self) -> TvSnapshot {
        self.lock().snapshot()
    }

    pub fn captions(&self) -> &C {
        &self.captions
    }

    pub fn deck(&self) -> &AudioDeck {
        &self.deck
    }

    // -----------------------------------------------------------------------
    // Keyword edits
    // -----------------------------------------------------------------------

    /// Edit one keyword field.
    pub fn set_keyword(&self, slot: KeywordSlot, value: impl Into<String>) -> Result<(), CoreError> {
        let mut state = self.lock();
        state.keywords.set(slot, value)?;
        self.bus.publish(TvEventKind::KeywordsChanged {
            keywords: state.keywords.clone(),
        });
        Ok(())
    }

    /// Replace all three keyword fields at once.
    pub fn set_keywords(&self, keywords: KeywordSet) -> Result<(), CoreError> {
        keywords.ensure_valid()?;
        let mut state = self.lock();
        state.keywords = keywords.clone();
        self.bus.publish(TvEventKind::KeywordsChanged { keywords });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Generation orchestrator
    // -----------------------------------------------------------------------

    /// Trigger a generation from the current keyword fields.
    ///
    /// Before returning, this starts the audio, claims a token, clears any
    /// previous result and sets the phase to `generating`. The returned
    /// future requests the caption and preloads the image concurrently,
    /// stores the result, waits the settle delay and switches to `viewing`.
    /// An image failure returns the screen to `input` and yields
    /// [`PipelineError::GenerationFailed`].
    pub fn start(
        self: &Arc<Self>,
    ) -> impl Future<Output = Result<GenerationOutcome, PipelineError>> + Send + 'static {
        self.deck.play();

        let (generation, keywords) = {
            let mut state = self.lock();
            let generation = state.next_generation();
            state.phase = Phase::Generating;
            state.result.clear();
            self.publish_phase(Phase::Generating, generation);
            (generation, state.keywords.resolve())
        };

        let image_url = self.images.image_url(&keywords);
        tracing::info!(generation, keywords = %keywords, "Generation started");

        let tv = Arc::clone(self);
        async move { tv.complete_generation(generation, keywords, image_url).await }
    }

    async fn complete_generation(
        &self,
        generation: GenerationId,
        keywords: ResolvedKeywords,
        image_url: String,
    ) -> Result<GenerationOutcome, PipelineError> {
        let caption = async { Ok::<_, I::Error>(self.captions.write_caption(&keywords).await) };
        let joined = tokio::try_join!(caption, self.images.preload(&image_url));

        let caption = match joined {
            Ok((caption, ())) => caption,
            Err(e) => {
                if !self.transition_if_current(generation, Phase::Input) {
                    tracing::debug!(generation, error = %e, "Stale generation failed, ignoring");
                    return Ok(GenerationOutcome::Superseded);
                }
                tracing::error!(generation, error = %e, "Generation failed");
                return Err(PipelineError::GenerationFailed(Box::new(e)));
            }
        };

        let result = GenerationResult::new(image_url, caption);
        if !self.store_result(generation, &result) {
            tracing::debug!(generation, "Stale generation completed, discarding result");
            return Ok(GenerationOutcome::Superseded);
        }

        tokio::time::sleep(self.timings.view_settle).await;

        if !self.transition_if_current(generation, Phase::Viewing) {
            tracing::debug!(generation, "Generation superseded during settle delay");
            return Ok(GenerationOutcome::Superseded);
        }

        tracing::info!(generation, caption = %result.caption, "Generation on screen");
        Ok(GenerationOutcome::Viewing(result))
    }

    // -----------------------------------------------------------------------
    // Reset orchestrator
    // -----------------------------------------------------------------------

    /// Trigger a reset.
    ///
    /// Before returning, this claims a token (abandoning any in-flight
    /// generation) and shows the noise. The returned future waits the reset
    /// delay, then clears keywords and result and returns to `input`.
    pub fn reset(self: &Arc<Self>) -> impl Future<Output = ResetOutcome> + Send + 'static {
        let generation = {
            let mut state = self.lock();
            let generation = state.next_generation();
            state.phase = Phase::Generating;
            self.publish_phase(Phase::Generating, generation);
            generation
        };
        tracing::info!(generation, "Reset started");

        let tv = Arc::clone(self);
        async move {
            tokio::time::sleep(tv.timings.reset_delay).await;
            tv.complete_reset(generation)
        }
    }

    fn complete_reset(&self, generation: GenerationId) -> ResetOutcome {
        {
            let mut state = self.lock();
            if !state.is_current(generation) {
                tracing::debug!(generation, "Reset superseded");
                return ResetOutcome::Superseded;
            }
            state.keywords.clear();
            state.result.clear();
            state.phase = Phase::Input;
            self.bus.publish(TvEventKind::KeywordsChanged {
                keywords: state.keywords.clone(),
            });
            self.publish_phase(Phase::Input, generation);
        }
        tracing::info!(generation, "Reset complete");
        ResetOutcome::Cleared
    }

    // ---- private helpers ----

    fn lock(&self) -> MutexGuard<'_, TvState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish_phase(&self, phase: Phase, generation: GenerationId) {
        self.bus.publish(TvEventKind::PhaseChanged { phase, generation });
    }

    /// Set `phase` if `generation` still owns the screen.
    ///
    /// Events are published while the state lock is held so the bus order
    /// matches the order in which the state changed.
    fn transition_if_current(&self, generation: GenerationId, phase: Phase) -> bool {
        let mut state = self.lock();
        if !state.is_current(generation) {
            return false;
        }
        state.phase = phase;
        self.publish_phase(phase, generation);
        true
    }

    /// Store and announce `result` if `generation` still owns the screen.
    fn store_result(&self, generation: GenerationId, result: &GenerationResult) -> bool {
        let mut state = self.lock();
        if !state.is_current(generation) {
            return false;
        }
        state.result = result.clone();
        self.bus.publish(TvEventKind::ResultReady {
            generation,
            result: result.clone(),
        });
        true
    }
}
