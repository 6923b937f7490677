//! Event-to-screen relay.
//!
//! [`EventRelay`] subscribes to the [`TvEventBus`](safezone_pipeline::TvEventBus)
//! and forwards every event, serialized as JSON, to all attached screens.

use std::sync::Arc;

use axum::extract::ws::Message;
use safezone_pipeline::TvEvent;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::ws::WsManager;

pub struct EventRelay {
    ws_manager: Arc<WsManager>,
}

impl EventRelay {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the relay loop until `cancel` fires or the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<TvEvent>, cancel: CancellationToken) {
        loop {
            let received = tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("Event relay cancelled");
                    break;
                }
                received = receiver.recv() => received,
            };

            match received {
                Ok(event) => self.forward(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event relay lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, relay shutting down");
                    break;
                }
            }
        }
    }

    async fn forward(&self, event: &TvEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => self.ws_manager.broadcast(Message::Text(payload.into())).await,
            Err(e) => tracing::error!(error = %e, "Failed to serialize screen event"),
        }
    }
}
