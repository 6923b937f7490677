//! Handlers for the `/tv` resource.
//!
//! Start and reset return as soon as the synchronous half of the
//! orchestrator has run (phase already `generating`); the rest runs on a
//! background task and is observed through the WebSocket.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use safezone_core::audio::AudioCue;
use safezone_core::keywords::{KeywordSet, KeywordSlot};
use safezone_pipeline::TvSnapshot;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `PUT /tv/keywords/{slot}`.
#[derive(Debug, Deserialize)]
pub struct KeywordInput {
    #[serde(default)]
    pub value: String,
}

/// GET /api/v1/tv
pub async fn get_tv(State(state): State<AppState>) -> Json<DataResponse<TvSnapshot>> {
    Json(DataResponse {
        data: state.tv.snapshot(),
    })
}

/// PUT /api/v1/tv/keywords
pub async fn put_keywords(
    State(state): State<AppState>,
    Json(keywords): Json<KeywordSet>,
) -> AppResult<Json<DataResponse<TvSnapshot>>> {
    state.tv.set_keywords(keywords)?;
    Ok(Json(DataResponse {
        data: state.tv.snapshot(),
    }))
}

/// PUT /api/v1/tv/keywords/{slot}
pub async fn put_keyword(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    Json(input): Json<KeywordInput>,
) -> AppResult<Json<DataResponse<TvSnapshot>>> {
    let slot: KeywordSlot = slot.parse()?;
    state.tv.set_keyword(slot, input.value)?;
    Ok(Json(DataResponse {
        data: state.tv.snapshot(),
    }))
}

/// POST /api/v1/tv/start
///
/// Responds 202 with the `generating` snapshot.
pub async fn start(State(state): State<AppState>) -> impl IntoResponse {
    let run = state.tv.start();
    let snapshot = state.tv.snapshot();
    tokio::spawn(run);

    (StatusCode::ACCEPTED, Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/tv/reset
pub async fn reset(State(state): State<AppState>) -> impl IntoResponse {
    let run = state.tv.reset();
    let snapshot = state.tv.snapshot();
    tokio::spawn(run);

    (StatusCode::ACCEPTED, Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/tv/audio
pub async fn get_audio(State(state): State<AppState>) -> Json<DataResponse<AudioCue>> {
    Json(DataResponse {
        data: state.tv.deck().cue().clone(),
    })
}
