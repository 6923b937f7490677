//! REST client for the Gemini `generateContent` endpoint.
//!
//! Wraps a single text-only call using [`reqwest`]. The API key travels in
//! the `x-goog-api-key` header.

use serde::{Deserialize, Serialize};

/// Default model for caption generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Connection settings for the text collaborator.
///
/// `api_key == None` selects degraded mode: no request is ever made.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response body of `generateContent`. Only the text parts are read.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gemini returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The call succeeded but produced no usable text.
    #[error("Gemini returned an empty response")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client bound to one model and credential.
pub struct GeminiApi {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiApi {
    /// Create a client with its own connection pool.
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, model, base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(
        client: reqwest::Client,
        api_key: String,
        model: String,
        base_url: String,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    /// Model name used in the request path.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single text prompt and return the trimmed reply.
    ///
    /// Blank replies are reported as [`GeminiApiError::EmptyResponse`].
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiApiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: GenerateContentResponse = Self::parse_response(response).await?;

        match parsed.text() {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(GeminiApiError::EmptyResponse),
        }
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
