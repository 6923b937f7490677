//! Seams for the two external generative services.
//!
//! The caption writer is infallible by type: implementations mask every
//! failure with a stock sentence. The image source can fail, and that
//! failure aborts a generation.

use async_trait::async_trait;

use crate::keywords::ResolvedKeywords;

/// Produces a short caption for a set of keywords.
#[async_trait]
pub trait CaptionWriter: Send + Sync + 'static {
    /// Always returns a sentence; never an error.
    async fn write_caption(&self, keywords: &ResolvedKeywords) -> String;

    /// Whether a live backend is configured (`false` means degraded mode).
    fn is_live(&self) -> bool;
}

/// Produces image URLs and confirms they load.
#[async_trait]
pub trait ImageSource: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build a request URL. Pure apart from drawing a fresh random seed.
    fn image_url(&self, keywords: &ResolvedKeywords) -> String;

    /// Fetch and decode the image at `url`.
    async fn preload(&self, url: &str) -> Result<(), Self::Error>;
}
