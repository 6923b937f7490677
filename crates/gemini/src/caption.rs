//! Total caption generation on top of [`GeminiApi`].

use async_trait::async_trait;
use safezone_core::collaborators::CaptionWriter;
use safezone_core::keywords::ResolvedKeywords;
use safezone_core::prompt::{caption_prompt, FALLBACK_CAPTION, PAUSED_CAPTION};

use crate::api::{GeminiApi, GeminiConfig};

/// Caption source that never fails.
///
/// Without an API client it always answers [`PAUSED_CAPTION`]; a failed or
/// empty remote call answers [`FALLBACK_CAPTION`].
pub struct CaptionGenerator {
    api: Option<GeminiApi>,
}

impl CaptionGenerator {
    pub fn new(api: Option<GeminiApi>) -> Self {
        Self { api }
    }

    /// Degraded mode: no remote calls.
    pub fn paused() -> Self {
        Self { api: None }
    }

    /// Build from config. A missing or blank key selects degraded mode.
    pub fn from_config(config: &GeminiConfig, client: reqwest::Client) -> Self {
        let api = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| {
                GeminiApi::with_client(
                    client,
                    key.to_string(),
                    config.model.clone(),
                    config.base_url.clone(),
                )
            });

        if api.is_none() {
            tracing::warn!("No Gemini API key configured, captions will use fallback text");
        }

        Self { api }
    }

    pub async fn generate(&self, keywords: &ResolvedKeywords) -> String {
        let Some(api) = &self.api else {
            tracing::debug!("Caption requested in paused mode");
            return PAUSED_CAPTION.to_string();
        };

        match api.generate_text(&caption_prompt(keywords)).await {
            Ok(text) => {
                tracing::debug!(model = api.model(), caption = %text, "Caption generated");
                text
            }
            Err(e) => {
                tracing::error!(error = %e, "Gemini generation error");
                FALLBACK_CAPTION.to_string()
            }
        }
    }
}

#[async_trait]
impl CaptionWriter for CaptionGenerator {
    async fn write_caption(&self, keywords: &ResolvedKeywords) -> String {
        self.generate(keywords).await
    }

    fn is_live(&self) -> bool {
        self.api.is_some()
    }
}
