//! Prompt text sent to the two generative collaborators.
//!
//! Both prompts are pure functions of the resolved keywords so they can be
//! asserted on directly in tests.

use crate::keywords::ResolvedKeywords;

// ---------------------------------------------------------------------------
// Caption
// ---------------------------------------------------------------------------

/// Caption used when no text-generation credential is configured.
pub const PAUSED_CAPTION: &str = "The simulation is paused.";

/// Caption used when the text-generation call fails or returns nothing.
pub const FALLBACK_CAPTION: &str = "You have been here before.";

/// Example lines embedded in the caption prompt to set the register.
pub const CAPTION_EXAMPLES: &[&str] = &[
    "You have been here before.",
    "The pain doesn't exist here.",
    "Don't wake up yet.",
    "It is safe in the static.",
    "Playtime is eternal.",
];

/// Upper bound on caption length requested from the model, in words.
pub const CAPTION_MAX_WORDS: usize = 10;

/// Build the caption request for the text model.
pub fn caption_prompt(keywords: &ResolvedKeywords) -> String {
    let examples: String = CAPTION_EXAMPLES
        .iter()
        .map(|line| format!("- \"{line}\"\n"))
        .collect();

    format!(
        "You are a surreal, liminal space generator.\n\
         Based on these keywords: \"{keywords}\".\n\
         Generate a single, short, cryptic, comforting yet slightly unsettling sentence \
         (max {CAPTION_MAX_WORDS} words).\n\
         It should feel like a \"Dreamcore\" or \"Weirdcore\" caption.\n\
         Examples:\n\
         {examples}\n\
         Output ONLY the sentence. No quotes.\n",
        keywords = keywords.joined(),
    )
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// Aesthetic phrase appended to every image prompt.
pub const IMAGE_STYLE: &str = "dreamcore, weirdcore, liminal space, soft lighting, grain, \
                               low fidelity, 90s aesthetic, ethereal, vhs quality";

/// Build the (unencoded) image prompt.
pub fn image_prompt(keywords: &ResolvedKeywords) -> String {
    format!("surreal version of {}, {IMAGE_STYLE}", keywords.joined())
}
