//! Application assembly shared by the binary and the integration tests.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use safezone_gemini::CaptionGenerator;
use safezone_imagegen::PollinationsImages;
use safezone_pipeline::{AudioDeck, Tv, TvEventBus};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::audio::ScreenAudio;
use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;
use crate::ws::WsManager;

/// Wire the collaborators, audio deck and television into an [`AppState`].
///
/// The audio deck is acquired here, exactly once per process.
pub fn build_state(config: ServerConfig, client: reqwest::Client) -> anyhow::Result<AppState> {
    let ws_manager = Arc::new(WsManager::new());
    let event_bus = Arc::new(TvEventBus::default());

    let captions = CaptionGenerator::from_config(&config.gemini, client.clone());
    let images = PollinationsImages::from_config(&config.image, client)
        .context("Failed to configure image collaborator")?;

    let output = Arc::new(ScreenAudio::new(
        Arc::clone(&ws_manager),
        Arc::clone(&event_bus),
    ));
    let deck = AudioDeck::acquire(output, config.audio.clone());

    let tv = Arc::new(Tv::new(
        captions,
        images,
        deck,
        Arc::clone(&event_bus),
        config.timings,
    ));

    Ok(AppState {
        config: Arc::new(config),
        ws_manager,
        tv,
        event_bus,
    })
}

/// Build the full router with its middleware stack.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = build_cors_layer(&state.config)?;
    let request_timeout = Duration::from_secs(state.config.request_timeout_secs);
    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        // Health check at root level (not under /api/v1).
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        // -- Middleware stack (applied bottom-up) --
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

/// Build the CORS middleware layer from server configuration.
///
/// Fails if any configured origin is not a valid header value.
fn build_cors_layer(config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    let origins = config
        .cors_origins
        .iter()
        .map(|o| o.parse().with_context(|| format!("Invalid CORS origin '{o}'")))
        .collect::<anyhow::Result<Vec<HeaderValue>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600)))
}
