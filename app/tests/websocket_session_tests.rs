//! WebSocket tests for the `/play` endpoint
//!
//! These tests drive real sockets through the router to verify:
//! - Participants receive the published snapshots
//! - A third socket is closed with a policy violation
//! - Binary frames never reach the game

use axum_test::{TestServer, TestServerConfig, TestWebSocket, WsMessage};
use serde_json::Value;
use std::time::Duration;
use tictactoe_live::{config::ServerConfig, routes, state::AppState};

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Helper to create a server on a real HTTP transport, which upgrades need
fn create_test_server() -> (TestServer, AppState) {
    let state = AppState::new(&ServerConfig::default());
    let app = routes::router(state.clone());

    let server = TestServerConfig::builder()
        .http_transport()
        .build_server(app)
        .unwrap();

    (server, state)
}

async fn open_socket(server: &TestServer) -> TestWebSocket {
    server.get_websocket("/play").await.into_websocket().await
}

async fn next_message(socket: &mut TestWebSocket) -> WsMessage {
    tokio::time::timeout(RECEIVE_TIMEOUT, socket.receive_message())
        .await
        .expect("timed out waiting for a frame")
}

async fn next_snapshot(socket: &mut TestWebSocket) -> Value {
    match next_message(socket).await {
        WsMessage::Text(text) => serde_json::from_str(&text).unwrap(),
        other => panic!("expected a text snapshot, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sockets_receive_roles_and_moves() {
    let (server, _state) = create_test_server();

    let mut first = open_socket(&server).await;
    let joined = next_snapshot(&mut first).await;
    assert_eq!(joined["connectedPlayers"], serde_json::json!(["X"]));

    let mut second = open_socket(&server).await;
    let joined = next_snapshot(&mut second).await;
    assert_eq!(joined["connectedPlayers"], serde_json::json!(["X", "O"]));
    assert_eq!(next_snapshot(&mut first).await, joined);

    first.send_text(r#"{"row":0,"col":2}"#).await;

    let seen_by_first = next_snapshot(&mut first).await;
    let seen_by_second = next_snapshot(&mut second).await;
    assert_eq!(seen_by_first, seen_by_second);
    assert_eq!(seen_by_first["field"][0][2], "X");
    assert_eq!(seen_by_first["playerAtTurn"], "O");
}

#[tokio::test]
async fn test_third_socket_closed_as_session_full() {
    let (server, state) = create_test_server();

    let mut first = open_socket(&server).await;
    next_snapshot(&mut first).await;
    let mut second = open_socket(&server).await;
    next_snapshot(&mut second).await;

    let mut third = open_socket(&server).await;

    match next_message(&mut third).await {
        WsMessage::Close(Some(frame)) => {
            assert_eq!(u16::from(frame.code), 1008);
            assert_eq!(frame.reason, "session is full");
        }
        other => panic!("expected a close frame, got {:?}", other),
    }

    let roster = state.session.snapshot().await.connected_roles;
    assert_eq!(roster.len(), 2);
}

#[tokio::test]
async fn test_binary_frame_leaves_board_unchanged() {
    let (server, state) = create_test_server();

    let mut first = open_socket(&server).await;
    next_snapshot(&mut first).await;
    let mut second = open_socket(&server).await;
    next_snapshot(&mut second).await;
    next_snapshot(&mut first).await;

    // A well-formed move sent as binary must be ignored
    first
        .send_message(WsMessage::Binary(br#"{"row":0,"col":0}"#.to_vec()))
        .await;
    first.send_text(r#"{"row":1,"col":1}"#).await;

    // Frames are handled in order, so the next snapshot follows the text move
    let snapshot = next_snapshot(&mut first).await;
    assert_eq!(snapshot["field"][0][0], Value::Null);
    assert_eq!(snapshot["field"][1][1], "X");
    assert_eq!(snapshot["playerAtTurn"], "O");

    assert_eq!(state.session.snapshot().await.board.mark_count(), 1);
}

#[tokio::test]
async fn test_closed_socket_frees_its_role() {
    let (server, state) = create_test_server();

    let mut first = open_socket(&server).await;
    next_snapshot(&mut first).await;
    let mut second = open_socket(&server).await;
    next_snapshot(&mut second).await;
    next_snapshot(&mut first).await;

    second.close().await;

    let snapshot = next_snapshot(&mut first).await;
    assert_eq!(snapshot["connectedPlayers"], serde_json::json!(["X"]));
    assert_eq!(state.session.snapshot().await.connected_roles.len(), 1);
}
