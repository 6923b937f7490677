pub mod health;
pub mod tv;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ws                      WebSocket (screens)
///
/// /tv                      snapshot (GET)
/// /tv/keywords             replace all three fields (PUT)
/// /tv/keywords/{slot}      edit one field (PUT)
/// /tv/start                trigger a generation (POST)
/// /tv/reset                trigger a reset (POST)
/// /tv/audio                background track cue (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/tv", tv::router())
}
