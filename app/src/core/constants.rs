/// Side length of the square board
pub const BOARD_SIZE: usize = 3;

/// Maximum number of participants a session accepts
pub const MAX_PLAYERS: usize = 2;

/// Delay between a finished round and the automatic board reset
pub const ROUND_RESET_DELAY_MS: u64 = 5000;

/// Largest inbound text frame accepted from a participant (1KB)
pub const MAX_MESSAGE_BYTES: usize = 1024;

/// Snapshots buffered per participant before new ones are dropped
pub const PARTICIPANT_QUEUE_CAPACITY: usize = 100;
