use serde::{Deserialize, Serialize};
use std::fmt;

/// The two participant roles of a session
///
/// `X` is always the first role handed out and the one that opens every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    X,
    O,
}

impl Role {
    /// Every role, in assignment order
    pub const ALL: [Role; 2] = [Role::X, Role::O];

    /// Role that opens each round
    pub const FIRST: Role = Role::X;

    /// Get the string representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::X => "X",
            Role::O => "O",
        }
    }

    /// The other role
    pub fn opponent(self) -> Role {
        match self {
            Role::X => Role::O,
            Role::O => Role::X,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
