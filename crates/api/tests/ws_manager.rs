//! Unit tests for `WsManager`.
//!
//! These exercise the connection manager directly, without performing any
//! HTTP upgrades.

use std::sync::Arc;

use axum::extract::ws::Message;
use safezone_api::ws::WsManager;

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
    assert!(!manager.has_listeners());
}

// ---------------------------------------------------------------------------
// Test: add() and remove() keep both counts in step
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_listeners() {
    let manager = WsManager::new();

    let _rx = manager.add("screen-1".to_string()).await;
    assert_eq!(manager.connection_count().await, 1);
    assert!(manager.has_listeners());

    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("screen-1").await;
    assert_eq!(manager.connection_count().await, 0);
    assert!(!manager.has_listeners());
}

// ---------------------------------------------------------------------------
// Test: add_with_greeting() queues the greeting ahead of any broadcast
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn greeting_arrives_before_concurrent_broadcasts() {
    let manager = Arc::new(WsManager::new());
    let _existing = manager.add("screen-0".to_string()).await;

    let broadcaster = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move {
            for _ in 0..200 {
                manager.broadcast(Message::Text("event".into())).await;
                tokio::task::yield_now().await;
            }
        })
    };

    for i in 1..=20 {
        let mut rx = manager
            .add_with_greeting(format!("screen-{i}"), || Message::Text("greeting".into()))
            .await;
        let first = rx.recv().await.expect("should receive greeting");
        assert!(matches!(first, Message::Text(t) if t.as_str() == "greeting"));
    }

    broadcaster.await.unwrap();
    assert_eq!(manager.connection_count().await, 21);
    assert!(manager.has_listeners());
}

// ---------------------------------------------------------------------------
// Test: broadcast() reaches every screen
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broadcast_delivers_to_all_connections() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("screen-1".to_string()).await;
    let mut rx2 = manager.add("screen-2".to_string()).await;

    manager
        .broadcast(Message::Text("{\"type\":\"phase_changed\"}".into()))
        .await;

    for rx in [&mut rx1, &mut rx2] {
        let msg = rx.recv().await.expect("should receive broadcast");
        assert!(matches!(msg, Message::Text(t) if t.as_str() == "{\"type\":\"phase_changed\"}"));
    }
}

// ---------------------------------------------------------------------------
// Test: send_to() targets one screen and reports missing ones
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_targets_a_single_connection() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("screen-1".to_string()).await;
    let mut rx2 = manager.add("screen-2".to_string()).await;

    assert!(manager.send_to("screen-1", Message::Text("hello".into())).await);
    assert!(!manager.send_to("screen-3", Message::Text("hello".into())).await);

    assert!(matches!(rx1.recv().await, Some(Message::Text(_))));
    assert!(rx2.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears all connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("screen-1".to_string()).await;
    let mut rx2 = manager.add("screen-2".to_string()).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert!(!manager.has_listeners());

    for rx in [&mut rx1, &mut rx2] {
        let msg = rx.recv().await.expect("should receive Close");
        assert!(matches!(msg, Message::Close(None)), "Expected Close(None), got: {msg:?}");
        // The sender was dropped with the map.
        assert!(rx.recv().await.is_none());
    }
}

// ---------------------------------------------------------------------------
// Test: ping_all() sends a Ping frame
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_sends_ping() {
    let manager = WsManager::new();
    let mut rx = manager.add("screen-1".to_string()).await;

    manager.ping_all().await;

    assert!(matches!(rx.recv().await, Some(Message::Ping(_))));
}
