use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Bytes;
use axum::extract::ws::Message;
use safezone_core::types::Timestamp;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single attached screen.
pub struct WsConnection {
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all attached screens.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. The connection count is mirrored in an
/// atomic so synchronous callers (the audio output) can check for a
/// listener without awaiting the lock.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
    live: AtomicUsize,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            live: AtomicUsize::new(0),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut conns = self.connections.write().await;
        self.insert(&mut conns, conn_id, tx);
        rx
    }

    /// Register a new connection whose first message is `greeting()`.
    ///
    /// The greeting is built and queued while the map is write-locked, so
    /// no broadcast can reach the connection ahead of it.
    pub async fn add_with_greeting(
        &self,
        conn_id: String,
        greeting: impl FnOnce() -> Message,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut conns = self.connections.write().await;
        let _ = tx.send(greeting());
        self.insert(&mut conns, conn_id, tx);
        rx
    }

    fn insert(&self, conns: &mut HashMap<String, WsConnection>, conn_id: String, sender: WsSender) {
        let conn = WsConnection {
            sender,
            connected_at: chrono::Utc::now(),
        };
        conns.insert(conn_id, conn);
        self.live.store(conns.len(), Ordering::Release);
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        let mut conns = self.connections.write().await;
        conns.remove(conn_id);
        self.live.store(conns.len(), Ordering::Release);
    }

    /// Send a message to one connection. Returns `false` if it is gone.
    pub async fn send_to(&self, conn_id: &str, message: Message) -> bool {
        self.connections
            .read()
            .await
            .get(conn_id)
            .is_some_and(|conn| conn.sender.send(message).is_ok())
    }

    /// Broadcast a message to all attached screens.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    pub async fn broadcast(&self, message: Message) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(message.clone());
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Lock-free view of [`connection_count`](Self::connection_count).
    pub fn has_listeners(&self) -> bool {
        self.live.load(Ordering::Acquire) > 0
    }

    /// Send a Close frame to every connection, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        self.live.store(0, Ordering::Release);
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected screen.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
