use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Messages a screen may send back to the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The background track reached its end.
    AudioEnded,
    /// The screen refused to play (typically an autoplay policy).
    AudioRejected {
        #[serde(default)]
        reason: Option<String>,
    },
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the screen is registered with `WsManager`, greeted with
/// the current snapshot and audio cue, and then receives every `TvEvent`.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Manage a single screen connection after upgrade.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Screen connected");

    let ws_manager = state.ws_manager.clone();
    let mut rx = ws_manager
        .add_with_greeting(conn_id.clone(), || greeting(&state))
        .await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                if let Err(e) = process_client_message(&text, &state) {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring screen message");
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Screen disconnected");
}

/// The first frame a screen receives: current snapshot plus audio cue.
fn greeting(state: &AppState) -> Message {
    let greeting = json!({
        "type": "snapshot",
        "snapshot": state.tv.snapshot(),
        "audio": state.tv.deck().cue(),
    });
    Message::Text(greeting.to_string().into())
}

/// Parse and apply one inbound screen message.
pub(crate) fn process_client_message(text: &str, state: &AppState) -> Result<(), AppError> {
    let msg: ClientMessage = serde_json::from_str(text)
        .map_err(|e| AppError::BadRequest(format!("Invalid screen message: {e}")))?;

    match msg {
        ClientMessage::AudioEnded => {
            tracing::debug!("Screen reported end of track");
            state.tv.deck().mark_ended();
        }
        ClientMessage::AudioRejected { reason } => {
            tracing::warn!(reason = reason.as_deref().unwrap_or("unknown"), "Screen blocked audio playback");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use safezone_core::keywords::KeywordSlot;
    use safezone_pipeline::{TvEvent, TvEventKind};
    use tokio::sync::broadcast;

    use super::*;
    use crate::app::build_state;
    use crate::config::ServerConfig;

    /// State whose image host is unreachable; only the synchronous half of
    /// the orchestrators is exercised here.
    fn test_state() -> AppState {
        let config = ServerConfig::from_lookup(|name| match name {
            "IMAGE_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
            _ => None,
        })
        .unwrap();
        build_state(config, reqwest::Client::new()).unwrap()
    }

    fn audio_restarts(events: &mut broadcast::Receiver<TvEvent>) -> Vec<bool> {
        std::iter::from_fn(|| events.try_recv().ok())
            .filter_map(|e| match e.kind {
                TvEventKind::AudioCue { cue } => Some(cue.restart),
                _ => None,
            })
            .collect()
    }

    fn text(msg: Message) -> serde_json::Value {
        match msg {
            Message::Text(t) => serde_json::from_str(t.as_str()).unwrap(),
            other => panic!("expected a text frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn audio_ended_restarts_the_next_start_only() {
        let state = test_state();
        let _screen = state.ws_manager.add("screen".to_string()).await;
        let mut events = state.event_bus.subscribe();

        drop(state.tv.start());
        process_client_message(r#"{"type":"audio_ended"}"#, &state).unwrap();
        drop(state.tv.start());
        drop(state.tv.start());

        assert_eq!(audio_restarts(&mut events), vec![false, true, false]);
    }

    #[tokio::test]
    async fn malformed_frame_is_a_bad_request() {
        let state = test_state();
        for frame in ["not json", r#"{"type":"volume_up"}"#, r#"{"kind":"audio_ended"}"#] {
            let err = process_client_message(frame, &state).unwrap_err();
            assert_matches!(err, AppError::BadRequest(msg) if msg.starts_with("Invalid screen message"));
        }
        assert!(!state.tv.deck().is_ended());
    }

    #[tokio::test]
    async fn audio_rejected_leaves_the_deck_alone() {
        let state = test_state();
        process_client_message(r#"{"type":"audio_rejected","reason":"NotAllowedError"}"#, &state)
            .unwrap();
        assert!(!state.tv.deck().is_ended());
    }

    #[tokio::test]
    async fn greeting_carries_snapshot_and_audio_cue() {
        let state = test_state();
        state.tv.set_keyword(KeywordSlot::First, "mall").unwrap();

        let mut rx = state
            .ws_manager
            .add_with_greeting("screen".to_string(), || greeting(&state))
            .await;
        drop(state.tv.start());
        state.ws_manager.broadcast(Message::Text("{}".into())).await;

        let first = text(rx.recv().await.unwrap());
        assert_eq!(first["type"], "snapshot");
        assert_eq!(first["snapshot"]["phase"], "input");
        assert_eq!(first["snapshot"]["keywords"]["k1"], "mall");
        let volume = first["audio"]["volume"].as_f64().unwrap();
        assert!((volume - 0.4).abs() < 1e-6);
        assert!(first["audio"]["track_url"].as_str().unwrap().ends_with(".ogg"));
        assert_eq!(text(rx.recv().await.unwrap()), serde_json::json!({}));
    }

    #[test]
    fn parses_audio_ended() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"audio_ended"}"#).unwrap();
        assert_eq!(msg, ClientMessage::AudioEnded);
    }

    #[test]
    fn parses_audio_rejected_with_and_without_reason() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"audio_rejected"}"#).unwrap();
        assert_matches!(msg, ClientMessage::AudioRejected { reason: None });

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"audio_rejected","reason":"NotAllowedError"}"#).unwrap();
        assert_matches!(msg, ClientMessage::AudioRejected { reason: Some(r) } if r == "NotAllowedError");
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"volume_up"}"#).is_err());
    }
}
