//! The presentation state holder and its read-only snapshot.

use safezone_core::generation::GenerationResult;
use safezone_core::keywords::{KeywordSet, KeywordSlot, KEYWORD_SLOTS};
use safezone_core::phase::{shows_reset, shows_result, Phase};
use safezone_core::types::GenerationId;
use serde::Serialize;

/// Mutable screen state. Only [`crate::tv::Tv`] writes it.
#[derive(Debug, Default)]
pub struct TvState {
    pub phase: Phase,
    pub keywords: KeywordSet,
    pub result: GenerationResult,
    /// Token of the most recent start or reset trigger.
    pub generation: GenerationId,
}

impl TvState {
    /// Claim a new generation token, invalidating every in-flight one.
    pub fn next_generation(&mut self) -> GenerationId {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: GenerationId) -> bool {
        self.generation == generation
    }

    pub fn snapshot(&self) -> TvSnapshot {
        TvSnapshot {
            phase: self.phase,
            keywords: self.keywords.clone(),
            result: self.result.clone(),
            generation: self.generation,
            noise: self.phase.shows_noise(),
            show_result: shows_result(self.phase, &self.result),
            show_reset: shows_reset(self.phase, &self.result),
            placeholders: KeywordSlot::ALL.map(KeywordSlot::placeholder),
        }
    }
}

/// Everything a screen needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TvSnapshot {
    pub phase: Phase,
    pub keywords: KeywordSet,
    pub result: GenerationResult,
    pub generation: GenerationId,
    /// The static overlay is visible.
    pub noise: bool,
    /// The image and caption layer is visible.
    pub show_result: bool,
    /// The "wake up" control is offered.
    pub show_reset: bool,
    pub placeholders: [&'static str; KEYWORD_SLOTS],
}
