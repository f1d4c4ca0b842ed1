use serde::{Deserialize, Serialize};

use crate::core::{Role, SessionPhase, SessionState, BOARD_SIZE};

/// Snapshot of the session as sent to participants
///
/// ```json
/// {
///   "field": [["X", null, null], [null, "O", null], [null, null, null]],
///   "playerAtTurn": "X",
///   "winningPlayer": null,
///   "isBoardFull": false,
///   "connectedPlayers": ["X", "O"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    /// Board rows, top to bottom
    pub field: [[Option<Role>; BOARD_SIZE]; BOARD_SIZE],
    /// Role allowed to move next
    pub player_at_turn: Role,
    /// Role that completed a line, if any
    pub winning_player: Option<Role>,
    /// Whether every cell is occupied
    pub is_board_full: bool,
    /// Roles with a participant attached, in assignment order
    pub connected_players: Vec<Role>,
}

impl StateResponse {
    /// Serialize to the JSON text sent over the wire
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&SessionState> for StateResponse {
    fn from(state: &SessionState) -> Self {
        Self {
            field: *state.board.rows(),
            player_at_turn: state.player_at_turn,
            winning_player: state.winner,
            is_board_full: state.is_board_full,
            connected_players: state.connected_roles.iter().copied().collect(),
        }
    }
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the server answers
    pub status: String,
    /// Identifier of the hosted session
    pub session_id: String,
    /// Current phase of the session
    pub phase: SessionPhase,
    /// Number of attached participants
    pub connected_players: usize,
}
