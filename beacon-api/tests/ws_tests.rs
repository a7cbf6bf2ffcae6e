//! WebSocket Subscription Boundary Tests
//!
//! Serves the assembled router on an ephemeral listener and drives it with a
//! real WebSocket client, covering the observer protocol end to end:
//! the `connected` snapshot always arrives before any incremental event,
//! mutations arrive as incremental events in commit order, client frames are
//! ignored, and an observer that falls behind the event buffer is
//! disconnected instead of stalling the mutation path.

use beacon_api::{create_api_router, ApiConfig, AppState};
use beacon_storage::{AgentStatusUpdate, InMemorySnapshotBackend, StatusStore};
use beacon_test_utils::{seeded_document, task_fixture};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type ClientSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Serve the router on an ephemeral port; returns the ws URL and the store so
/// tests can mutate behind the gateway's back.
async fn spawn_server(event_capacity: usize) -> (String, Arc<StatusStore>) {
    let backend = InMemorySnapshotBackend::with_document(seeded_document(&["lucy"]));
    let store = Arc::new(StatusStore::open(backend, event_capacity).await);

    let app = create_api_router(AppState::new(store.clone()), &ApiConfig::default())
        .expect("router builds");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("ws://{addr}/ws"), store)
}

/// Next text frame, parsed as JSON. Panics if the connection yields anything
/// else or goes quiet.
async fn next_json(socket: &mut ClientSocket) -> Value {
    loop {
        let msg = timeout(RECV_TIMEOUT, socket.next())
            .await
            .expect("frame within timeout")
            .expect("stream open")
            .expect("frame readable");
        match msg {
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("json frame")
            }
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame {other:?}"),
        }
    }
}

#[tokio::test]
async fn observer_receives_snapshot_before_incremental_events() {
    let (url, store) = spawn_server(64).await;

    // Committed before the observer connects: visible only via the snapshot.
    store
        .append_task(task_fixture("lucy", "before connect"))
        .await
        .expect("append");

    let (mut socket, _response) = connect_async(url.as_str()).await.expect("ws connect");

    let first = next_json(&mut socket).await;
    assert_eq!(first["type"], "connected");
    assert!(first["data"]["agents"]["lucy"].is_object());
    assert_eq!(first["data"]["tasks"][0]["title"], "before connect");

    // Client frames are ignored; the channel stays pure push.
    socket
        .send(Message::Text("anyone there?".into()))
        .await
        .expect("client frame");

    store
        .append_task(task_fixture("lucy", "after connect"))
        .await
        .expect("append");
    store
        .update_agent_status("lucy", AgentStatusUpdate::default())
        .await
        .expect("update");

    let second = next_json(&mut socket).await;
    assert_eq!(second["type"], "task_added");
    assert_eq!(second["task"]["title"], "after connect");

    let third = next_json(&mut socket).await;
    assert_eq!(third["type"], "agent_update");
    assert_eq!(third["agent"]["id"], "lucy");

    socket.close(None).await.expect("close");
}

#[tokio::test]
async fn two_observers_see_the_same_event_order() {
    let (url, store) = spawn_server(64).await;

    let (mut early, _) = connect_async(url.as_str()).await.expect("ws connect");
    assert_eq!(next_json(&mut early).await["type"], "connected");

    store
        .append_task(task_fixture("lucy", "first"))
        .await
        .expect("append");

    // The late joiner's snapshot already contains the first task, so it must
    // not receive that event again.
    let (mut late, _) = connect_async(url.as_str()).await.expect("ws connect");
    let snapshot = next_json(&mut late).await;
    assert_eq!(snapshot["type"], "connected");
    assert_eq!(snapshot["data"]["tasks"][0]["title"], "first");

    store
        .append_task(task_fixture("lucy", "second"))
        .await
        .expect("append");

    let early_first = next_json(&mut early).await;
    assert_eq!(early_first["task"]["title"], "first");
    let early_second = next_json(&mut early).await;
    assert_eq!(early_second["task"]["title"], "second");

    let late_first = next_json(&mut late).await;
    assert_eq!(late_first["task"]["title"], "second");

    early.close(None).await.expect("close");
    late.close(None).await.expect("close");
}

#[tokio::test]
async fn lagged_observer_is_disconnected() {
    let (url, store) = spawn_server(1).await;

    let (mut socket, _response) = connect_async(url.as_str()).await.expect("ws connect");
    assert_eq!(next_json(&mut socket).await["type"], "connected");

    // An event frame too large for the socket buffers blocks the forward loop
    // while the client is not reading...
    let oversized = "x".repeat(12 * 1024 * 1024);
    store
        .append_task(task_fixture("lucy", &oversized))
        .await
        .expect("append");

    // ...so these overrun the 1-slot event buffer behind its back. None of
    // them blocks: the mutation path never waits for observers.
    for i in 0..4 {
        store
            .append_task(task_fixture("lucy", &format!("overflow {i}")))
            .await
            .expect("append");
    }
    assert_eq!(store.tasks().await.len(), 5);

    // Drain the connection. The server must cut a gapped observer off rather
    // than deliver a partial stream it would mistake for complete.
    let mut incremental = 0;
    loop {
        match timeout(RECV_TIMEOUT, socket.next())
            .await
            .expect("frame within timeout")
        {
            Some(Ok(Message::Text(_))) => incremental += 1,
            Some(Ok(Message::Close(_))) | None => break,
            Some(Ok(_)) => continue,
            Some(Err(_)) => break,
        }
    }
    assert!(
        incremental < 5,
        "a lagged observer must be disconnected, got {incremental} events"
    );
}
