//! Text collaborator: one-sentence captions from Google Gemini.
//!
//! [`api::GeminiApi`] wraps the `generateContent` REST endpoint.
//! [`caption::CaptionGenerator`] layers the total contract on top: it never
//! fails, substituting stock sentences for a missing credential or a failed
//! call.

pub mod api;
pub mod caption;

pub use api::{GeminiApi, GeminiApiError, GeminiConfig};
pub use caption::CaptionGenerator;
