//! Deterministic-apart-from-seed image request URLs.

use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use reqwest::Url;
use safezone_core::keywords::ResolvedKeywords;
use safezone_core::prompt::image_prompt;

use crate::error::ImageGenError;

/// Default image host.
pub const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai";

/// Default output size, in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Seeds are drawn from `0..SEED_RANGE`.
pub const SEED_RANGE: u32 = 99_999;

const NO_SEED: u32 = u32::MAX;

/// Image host settings.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Builds `{base}/prompt/{encoded prompt}?width=..&height=..&nologo=true&seed=..`.
///
/// Consecutive calls never reuse the previous seed, so two requests for the
/// same keywords always produce different URLs and never hit a cached image.
pub struct ImageUrlBuilder {
    base: Url,
    width: u32,
    height: u32,
    last_seed: AtomicU32,
}

impl ImageUrlBuilder {
    pub fn new(base_url: &str, width: u32, height: u32) -> Result<Self, ImageGenError> {
        let base = Url::parse(base_url)
            .map_err(|_| ImageGenError::InvalidBaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ImageGenError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base,
            width,
            height,
            last_seed: AtomicU32::new(NO_SEED),
        })
    }

    pub fn from_config(config: &ImageConfig) -> Result<Self, ImageGenError> {
        Self::new(&config.base_url, config.width, config.height)
    }

    /// Build a URL with a fresh random seed.
    pub fn build(&self, keywords: &ResolvedKeywords) -> String {
        self.build_with_seed(keywords, self.next_seed())
    }

    /// Build a URL with an explicit seed.
    pub fn build_with_seed(&self, keywords: &ResolvedKeywords, seed: u32) -> String {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("prompt")
                .push(&image_prompt(keywords));
        }
        url.query_pairs_mut()
            .append_pair("width", &self.width.to_string())
            .append_pair("height", &self.height.to_string())
            .append_pair("nologo", "true")
            .append_pair("seed", &seed.to_string());
        url.into()
    }

    fn next_seed(&self) -> u32 {
        self.advance_seed().1
    }

    /// Swap in a fresh seed, returning the previous and the new one.
    fn advance_seed(&self) -> (u32, u32) {
        let mut rng = rand::rng();
        let mut seed = NO_SEED;
        let previous = self
            .last_seed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                seed = rng.random_range(0..SEED_RANGE);
                while seed == last {
                    seed = rng.random_range(0..SEED_RANGE);
                }
                Some(seed)
            })
            .unwrap_or_else(|last| last);
        (previous, seed)
    }
}
