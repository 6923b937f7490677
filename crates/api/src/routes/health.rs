use axum::extract::State;
use axum::{routing::get, Json, Router};
use safezone_core::collaborators::CaptionWriter;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `live` when a caption API key is configured, `paused` otherwise.
    pub caption_mode: &'static str,
}

/// GET /health -- returns service status and caption mode.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let caption_mode = if state.tv.captions().is_live() {
        "live"
    } else {
        "paused"
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        caption_mode,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
