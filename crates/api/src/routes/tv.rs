//! Route definitions for the `/tv` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::tv;
use crate::state::AppState;

/// Routes mounted at `/tv`.
///
/// ```text
/// GET    /                  -> get_tv
/// PUT    /keywords          -> put_keywords
/// PUT    /keywords/{slot}   -> put_keyword
/// POST   /start             -> start
/// POST   /reset             -> reset
/// GET    /audio             -> get_audio
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tv::get_tv))
        .route("/keywords", put(tv::put_keywords))
        .route("/keywords/{slot}", put(tv::put_keyword))
        .route("/start", post(tv::start))
        .route("/reset", post(tv::reset))
        .route("/audio", get(tv::get_audio))
}
