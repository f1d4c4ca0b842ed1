use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Board, Role, MAX_PLAYERS};

/// Coarse phase of a session, derived from its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Fewer than two participants and no finished round on the board
    Lobby,
    /// Both participants connected, round in progress
    Active,
    /// Winner present or board full; waiting for the round reset
    Terminal,
}

/// Immutable snapshot of a session
///
/// Snapshots are never edited in place: every transition in
/// `services::game_state` builds and returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Marks placed so far this round
    pub board: Board,
    /// Role allowed to move next
    pub player_at_turn: Role,
    /// Role that completed a line this round
    pub winner: Option<Role>,
    /// True when every cell is occupied
    pub is_board_full: bool,
    /// Roles that currently have a participant attached
    pub connected_roles: BTreeSet<Role>,
}

impl SessionState {
    /// Create the initial state: empty board, `X` at turn, nobody connected
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            player_at_turn: Role::FIRST,
            winner: None,
            is_board_full: false,
            connected_roles: BTreeSet::new(),
        }
    }

    /// True when the round is finished (won or drawn)
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_board_full
    }

    /// True when the round ended with a full board and no winner
    pub fn is_draw(&self) -> bool {
        self.is_board_full && self.winner.is_none()
    }

    /// Check if both roles are taken
    pub fn is_full_roster(&self) -> bool {
        self.connected_roles.len() >= MAX_PLAYERS
    }

    /// First role without a participant, in assignment order
    pub fn next_free_role(&self) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| !self.connected_roles.contains(role))
    }

    /// Derive the phase from the current state
    pub fn phase(&self) -> SessionPhase {
        if self.is_terminal() {
            SessionPhase::Terminal
        } else if self.is_full_roster() {
            SessionPhase::Active
        } else {
            SessionPhase::Lobby
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
