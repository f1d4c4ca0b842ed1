use crate::{config::ServerConfig, core::GameSession};

/// Shared application state handed to every route
#[derive(Clone)]
pub struct AppState {
    pub session: GameSession,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            session: GameSession::with_reset_delay(config.round_reset_delay),
        }
    }
}
