use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use safezone_api::app::{build_router, build_state};
use safezone_api::config::ServerConfig;
use safezone_api::relay::EventRelay;
use safezone_api::ws;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "safezone_api=debug,safezone_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .with_context(|| format!("Invalid HOST address '{}'", config.host))?,
        config.port,
    );

    // --- Collaborators, audio deck, television ---
    let client = reqwest::Client::new();
    let state = build_state(config, client)?;
    let ws_manager = Arc::clone(&state.ws_manager);
    let event_bus = Arc::clone(&state.event_bus);

    // --- Background tasks ---
    let cancel = CancellationToken::new();
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager), cancel.clone());
    let relay = EventRelay::new(Arc::clone(&ws_manager));
    let relay_handle = tokio::spawn(relay.run(event_bus.subscribe(), cancel.clone()));
    tracing::info!("Event relay and heartbeat started");

    // --- Router ---
    let app = build_router(state)?;

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), relay_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), heartbeat_handle).await;
    tracing::info!("Event relay and heartbeat stopped");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
