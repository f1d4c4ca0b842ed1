pub mod game_state;
pub mod win_conditions;

pub use game_state::{apply_move, connect_role, disconnect_role, reset_round, validate_move};
pub use win_conditions::{determine_winner, winning_line};
