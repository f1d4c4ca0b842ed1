use thiserror::Error;

use crate::core::Role;

/// Errors surfaced by session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Both roles already have a participant
    #[error("session is full")]
    SessionFull,
    /// The registry already holds a channel for this role
    #[error("role {0} already has a registered channel")]
    RoleAlreadyBound(Role),
    /// Target cell is already occupied
    #[error("illegal move: cell ({row}, {col}) is occupied")]
    IllegalMove { row: usize, col: usize },
    /// Coordinates fall outside the board
    #[error("cell ({row}, {col}) is outside the board")]
    CellOutOfRange { row: usize, col: usize },
}

/// Reasons a move is ignored
///
/// Rejected moves never change the state and are never broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    /// Target cell already holds a mark
    #[error("cell is already occupied")]
    CellOccupied,
    /// A winner exists and the round is waiting for its reset
    #[error("round is already over")]
    RoundOver,
    /// The mover is not the role at turn
    #[error("not this role's turn")]
    NotYourTurn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(SessionError::SessionFull.to_string(), "session is full");
        assert_eq!(
            SessionError::RoleAlreadyBound(Role::O).to_string(),
            "role O already has a registered channel"
        );
        assert_eq!(
            SessionError::CellOutOfRange { row: 3, col: 0 }.to_string(),
            "cell (3, 0) is outside the board"
        );
        assert_eq!(MoveRejection::NotYourTurn.to_string(), "not this role's turn");
    }
}
