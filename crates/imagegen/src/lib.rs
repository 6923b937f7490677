//! Image collaborator: Pollinations-style prompt URLs plus a preloader.
//!
//! The URL is built locally (keywords, style phrase, random seed, fixed
//! dimensions); the image itself is generated by the remote service when
//! the URL is first fetched. [`preload::ImagePreloader`] performs that
//! fetch and decodes the bytes so a result is only shown once it is
//! displayable.

pub mod error;
pub mod preload;
pub mod url;

use async_trait::async_trait;
use safezone_core::collaborators::ImageSource;
use safezone_core::keywords::ResolvedKeywords;

pub use error::ImageGenError;
pub use preload::{ImageDimensions, ImagePreloader};
pub use url::{ImageConfig, ImageUrlBuilder};

/// [`ImageSource`] backed by an [`ImageUrlBuilder`] and an [`ImagePreloader`].
pub struct PollinationsImages {
    urls: ImageUrlBuilder,
    preloader: ImagePreloader,
}

impl PollinationsImages {
    pub fn new(urls: ImageUrlBuilder, preloader: ImagePreloader) -> Self {
        Self { urls, preloader }
    }

    pub fn from_config(config: &ImageConfig, client: reqwest::Client) -> Result<Self, ImageGenError> {
        Ok(Self::new(
            ImageUrlBuilder::from_config(config)?,
            ImagePreloader::with_client(client),
        ))
    }
}

#[async_trait]
impl ImageSource for PollinationsImages {
    type Error = ImageGenError;

    fn image_url(&self, keywords: &ResolvedKeywords) -> String {
        self.urls.build(keywords)
    }

    async fn preload(&self, url: &str) -> Result<(), ImageGenError> {
        let dims = self.preloader.preload(url).await?;
        tracing::debug!(width = dims.width, height = dims.height, "Image preloaded");
        Ok(())
    }
}
