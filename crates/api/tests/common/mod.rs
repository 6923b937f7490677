#![allow(dead_code)]

use std::io::Cursor;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use image::{ImageFormat, Rgb, RgbImage};
use safezone_core::audio::AudioCue;
use safezone_core::generation::Timings;
use safezone_core::phase::Phase;
use safezone_gemini::GeminiConfig;
use safezone_imagegen::ImageConfig;
use safezone_pipeline::TvSnapshot;
use tower::ServiceExt;

use safezone_api::app::{build_router, build_state};
use safezone_api::config::ServerConfig;
use safezone_api::state::AppState;

/// Build a test `ServerConfig` pointing the image collaborator at `image_base_url`.
///
/// No caption key is set, so captions run in paused mode. Delays are short
/// so tests can observe the full sequence on real time.
pub fn test_config(image_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        gemini: GeminiConfig::default(),
        image: ImageConfig {
            base_url: image_base_url.to_string(),
            width: 800,
            height: 600,
        },
        audio: AudioCue::default(),
        timings: Timings {
            view_settle: Duration::from_millis(20),
            reset_delay: Duration::from_millis(30),
        },
    }
}

/// Build the full application router and keep a handle on its state.
pub fn build_test_app(config: ServerConfig) -> (Router, AppState) {
    let state = build_state(config, reqwest::Client::new()).unwrap();
    let app = build_router(state.clone()).unwrap();
    (app, state)
}

/// Serve a small PNG for every `/prompt/{prompt}` request, or 404 when
/// `healthy` is false. Returns the base URL.
pub async fn spawn_image_host(healthy: bool) -> String {
    let mut png = Cursor::new(Vec::new());
    RgbImage::from_pixel(4, 3, Rgb([40, 40, 60]))
        .write_to(&mut png, ImageFormat::Png)
        .unwrap();
    let png = png.into_inner();

    let router = Router::new().route(
        "/prompt/{prompt}",
        axum::routing::get(move || {
            let png = png.clone();
            async move {
                if healthy {
                    (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png)
                } else {
                    (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "text/plain")], Vec::new())
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Poll the television until it reaches `phase`.
pub async fn wait_for_phase(state: &AppState, phase: Phase) -> TvSnapshot {
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let snapshot = state.tv.snapshot();
            if snapshot.phase == phase {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for phase {phase}"))
}
