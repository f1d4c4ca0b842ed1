use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{models::HealthResponse, state::AppState};

/// Health check endpoint
///
/// # Returns
///
/// JSON response with status and a summary of the hosted session
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.session.snapshot().await;

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            session_id: state.session.session_id().to_string(),
            phase: snapshot.phase(),
            connected_players: snapshot.connected_roles.len(),
        }),
    )
}
