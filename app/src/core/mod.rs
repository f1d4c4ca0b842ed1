pub mod board;
pub mod constants;
pub mod game_session;
pub mod role;
pub mod round_timer;
pub mod session_state;

pub use board::{Board, Cell};
pub use constants::*;
pub use game_session::{GameSession, ParticipantChannel};
pub use role::Role;
pub use round_timer::RoundTimer;
pub use session_state::{SessionPhase, SessionState};
