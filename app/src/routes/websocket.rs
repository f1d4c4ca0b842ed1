use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::{
    core::{GameSession, Role, PARTICIPANT_QUEUE_CAPACITY},
    models::MoveRequest,
    state::AppState,
};

/// WebSocket endpoint for playing in the session
///
/// # Flow
///
/// 1. Accept the WebSocket connection
/// 2. Claim a role (closes with a policy violation if the session is full)
/// 3. Forward published snapshots to the socket from a writer task
/// 4. Decode inbound text frames as moves
/// 5. Release the role when either side stops
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    tracing::debug!("WebSocket connection attempt");

    ws.on_upgrade(move |socket| handle_socket(socket, state.session))
}

/// Handle WebSocket connection
///
/// # Arguments
///
/// * `socket` - The WebSocket connection
/// * `session` - The session this participant joins
async fn handle_socket(socket: WebSocket, session: GameSession) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(PARTICIPANT_QUEUE_CAPACITY);

    let role = match session.connect(outbound_tx).await {
        Ok(role) => role,
        Err(e) => {
            tracing::warn!("WebSocket rejected: {}", e);
            let frame = CloseFrame {
                code: close_code::POLICY,
                reason: e.to_string().into(),
            };
            let _ = sender.send(Message::Close(Some(frame))).await;
            return;
        }
    };

    tracing::info!("WebSocket accepted: player={}", role);

    // Writer task keeps snapshots flowing while the reader awaits frames
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = outbound_rx.recv().await {
            if sender.send(Message::Text(payload)).await.is_err() {
                tracing::warn!("Failed to send state to player={}", role);
                break;
            }
        }
    });

    let reader_session = session.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => handle_text(&reader_session, role, &text).await,
                Message::Close(_) => {
                    tracing::debug!("Close message from player={}", role);
                    break;
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Axum handles WebSocket ping/pong frames automatically
                }
                Message::Binary(_) => {
                    tracing::warn!("Unexpected binary message from player={}", role);
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => {
            tracing::debug!("Send task finished for player={}", role);
            recv_task.abort();
        }
        _ = &mut recv_task => {
            tracing::debug!("Receive task finished for player={}", role);
            send_task.abort();
        }
    }

    session.disconnect(role).await;

    tracing::info!("WebSocket connection closed: player={}", role);
}

/// Decode a text frame and apply it as a move
///
/// Anything that is not a valid move is dropped.
async fn handle_text(session: &GameSession, role: Role, text: &str) {
    match MoveRequest::parse(text) {
        Ok(cell) => {
            // Rejections are logged by the session and never reach the client as errors
            let _ = session.make_move(role, cell).await;
        }
        Err(e) => {
            tracing::debug!("Ignoring message from player={}: {}", role, e);
        }
    }
}
