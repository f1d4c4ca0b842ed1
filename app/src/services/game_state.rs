use crate::core::{Cell, Role, SessionState};
use crate::error::{MoveRejection, SessionError};

/// Check if a move may be applied
///
/// # Arguments
///
/// * `state` - Current session snapshot
/// * `role` - Role attempting the move
/// * `cell` - Target cell
///
/// # Errors
///
/// Returns the reason the move must be ignored
pub fn validate_move(state: &SessionState, role: Role, cell: Cell) -> Result<(), MoveRejection> {
    if state.winner.is_some() {
        return Err(MoveRejection::RoundOver);
    }

    if state.board.get(cell).is_some() {
        return Err(MoveRejection::CellOccupied);
    }

    if state.player_at_turn != role {
        return Err(MoveRejection::NotYourTurn);
    }

    Ok(())
}

/// Apply a move, producing the next snapshot
///
/// Places the mark, hands the turn to the opponent and recomputes
/// fullness and winner. The input snapshot is left untouched.
///
/// # Errors
///
/// Returns a `MoveRejection` if the move is not allowed; no state changes.
/// A board-level `IllegalMove` (occupied cell) surfaces as `CellOccupied`.
pub fn apply_move(
    state: &SessionState,
    role: Role,
    cell: Cell,
) -> Result<SessionState, MoveRejection> {
    validate_move(state, role, cell)?;

    let board = state
        .board
        .place(role, cell)
        .map_err(placement_rejection)?;

    Ok(SessionState {
        board,
        player_at_turn: role.opponent(),
        winner: board.winner(),
        is_board_full: board.is_full(),
        connected_roles: state.connected_roles.clone(),
    })
}

/// Translate a failed placement into the reason the move is ignored
fn placement_rejection(error: SessionError) -> MoveRejection {
    match error {
        SessionError::IllegalMove { .. } => MoveRejection::CellOccupied,
        other => {
            tracing::error!("Unexpected placement failure: {}", other);
            MoveRejection::CellOccupied
        }
    }
}

/// Add a role to the connected roster
pub fn connect_role(state: &SessionState, role: Role) -> SessionState {
    let mut connected_roles = state.connected_roles.clone();
    connected_roles.insert(role);

    SessionState {
        connected_roles,
        ..state.clone()
    }
}

/// Remove a role from the connected roster
///
/// The board, turn and winner are kept; only the roster shrinks.
pub fn disconnect_role(state: &SessionState, role: Role) -> SessionState {
    let mut connected_roles = state.connected_roles.clone();
    connected_roles.remove(&role);

    SessionState {
        connected_roles,
        ..state.clone()
    }
}

/// Start a fresh round
///
/// Clears the board, winner and fullness and gives the turn back to `X`.
/// The connected roster is carried over.
pub fn reset_round(state: &SessionState) -> SessionState {
    SessionState {
        connected_roles: state.connected_roles.clone(),
        ..SessionState::new()
    }
}
