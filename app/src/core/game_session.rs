use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{Cell, Role, RoundTimer, SessionState, ROUND_RESET_DELAY_MS};
use crate::error::{MoveRejection, SessionError};
use crate::models::StateResponse;
use crate::services::{apply_move, connect_role, disconnect_role, reset_round, winning_line};

/// Outbound channel of one participant
///
/// Sending never waits on the network: a per-connection writer task drains
/// the receiving end. The queue is bounded by `PARTICIPANT_QUEUE_CAPACITY`;
/// snapshots that do not fit are dropped for that participant only.
pub type ParticipantChannel = mpsc::Sender<String>;

/// Everything guarded by the session lock
#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    channels: HashMap<Role, ParticipantChannel>,
    timer: RoundTimer,
}

#[derive(Debug)]
struct SessionShared {
    session_id: String,
    round_reset_delay: Duration,
    inner: Mutex<SessionInner>,
}

/// One two-player game session
///
/// Cloning is cheap and yields another handle to the same session. All
/// mutations (connect, disconnect, moves and the round reset) run one at a
/// time under a single lock, and every accepted transition is published to
/// the registered channels before the lock is released, so each participant
/// sees snapshots in order.
#[derive(Debug, Clone)]
pub struct GameSession {
    shared: Arc<SessionShared>,
}

impl GameSession {
    /// Create a session with the default round reset delay
    pub fn new() -> Self {
        Self::with_reset_delay(Duration::from_millis(ROUND_RESET_DELAY_MS))
    }

    /// Create a session with a custom round reset delay
    pub fn with_reset_delay(round_reset_delay: Duration) -> Self {
        let session_id = Uuid::new_v4().to_string();
        tracing::info!("Session {} created", session_id);

        Self {
            shared: Arc::new(SessionShared {
                session_id,
                round_reset_delay,
                inner: Mutex::new(SessionInner {
                    state: SessionState::new(),
                    channels: HashMap::new(),
                    timer: RoundTimer::new(),
                }),
            }),
        }
    }

    /// Unique identifier of this session
    pub fn session_id(&self) -> &str {
        &self.shared.session_id
    }

    /// Delay between a finished round and its reset
    pub fn round_reset_delay(&self) -> Duration {
        self.shared.round_reset_delay
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> SessionState {
        self.shared.inner.lock().await.state.clone()
    }

    /// Attach a participant
    ///
    /// Hands out `X` if free, otherwise `O`. Role choice, channel
    /// registration and the state update happen under one lock.
    ///
    /// # Arguments
    ///
    /// * `channel` - Outbound channel for this participant
    ///
    /// # Returns
    ///
    /// The role assigned to the participant
    ///
    /// # Errors
    ///
    /// * `SessionFull` - both roles are taken
    /// * `RoleAlreadyBound` - the registry and roster disagree
    pub async fn connect(&self, channel: ParticipantChannel) -> Result<Role, SessionError> {
        let mut inner = self.shared.inner.lock().await;

        let Some(role) = inner.state.next_free_role() else {
            tracing::warn!("Session {} rejected connection: session is full", self.session_id());
            return Err(SessionError::SessionFull);
        };

        if inner.channels.contains_key(&role) {
            tracing::error!(
                "Session {} registry already holds a channel for role {} that is not connected",
                self.session_id(),
                role
            );
            return Err(SessionError::RoleAlreadyBound(role));
        }

        inner.channels.insert(role, channel);
        let next = connect_role(&inner.state, role);
        inner.install(self.session_id(), next);

        tracing::info!("🎮 Player {} joined session {}", role, self.session_id());
        Ok(role)
    }

    /// Detach a participant
    ///
    /// Only the roster shrinks; the board, turn and winner are left as they are.
    pub async fn disconnect(&self, role: Role) {
        let mut inner = self.shared.inner.lock().await;

        let had_channel = inner.channels.remove(&role).is_some();
        if !inner.state.connected_roles.contains(&role) {
            tracing::debug!(
                "Session {} ignoring disconnect for unconnected role {} (channel={})",
                self.session_id(),
                role,
                had_channel
            );
            return;
        }

        let next = disconnect_role(&inner.state, role);
        inner.install(self.session_id(), next);

        tracing::info!("👋 Player {} left session {}", role, self.session_id());
    }

    /// Apply a move for `role`
    ///
    /// Rejected moves leave the state untouched and are not broadcast; the
    /// mover alone is sent the current snapshot so its view stays in sync.
    /// An accepted move is published exactly once, and arms the round reset
    /// when it ends the round.
    ///
    /// # Errors
    ///
    /// Returns the `MoveRejection` explaining why the move was ignored
    pub async fn make_move(&self, role: Role, cell: Cell) -> Result<(), MoveRejection> {
        let mut inner = self.shared.inner.lock().await;

        let next = match apply_move(&inner.state, role, cell) {
            Ok(next) => next,
            Err(rejection) => {
                tracing::debug!(
                    "Session {} ignored move by {} at ({}, {}): {}",
                    self.session_id(),
                    role,
                    cell.row(),
                    cell.col(),
                    rejection
                );
                inner.resync(self.session_id(), role);
                return Err(rejection);
            }
        };

        if next.is_terminal() {
            match next.winner {
                Some(winner) => tracing::info!(
                    "🏆 Player {} won the round in session {} after {} marks (line: {:?})",
                    winner,
                    self.session_id(),
                    next.board.mark_count(),
                    winning_line(&next.board)
                ),
                None => tracing::info!("Round drawn in session {}", self.session_id()),
            }
            self.arm_round_reset(&mut inner);
        }

        inner.install(self.session_id(), next);
        Ok(())
    }

    /// Tear the session down
    ///
    /// Cancels a pending round reset and drops every participant channel,
    /// which ends the connection writer tasks.
    pub async fn shutdown(&self) {
        let mut inner = self.shared.inner.lock().await;

        inner.timer.cancel();
        inner.channels.clear();
        inner.state = SessionState::new();

        tracing::info!("Session {} shut down", self.session_id());
    }

    /// Schedule the reset of a finished round, superseding any earlier one
    fn arm_round_reset(&self, inner: &mut SessionInner) {
        let session = Arc::downgrade(&self.shared);
        inner
            .timer
            .arm(self.shared.round_reset_delay, move |generation| {
                Self::fire_round_reset(session, generation)
            });
    }

    async fn fire_round_reset(session: Weak<SessionShared>, generation: u64) {
        // Session already dropped: nothing to reset
        if let Some(shared) = session.upgrade() {
            GameSession { shared }.finish_round(generation).await;
        }
    }

    /// Reset the board if `generation` is still the latest arming
    async fn finish_round(&self, generation: u64) -> bool {
        let mut inner = self.shared.inner.lock().await;

        if !inner.timer.complete(generation) {
            tracing::debug!(
                "Session {} skipped stale round reset (generation {}, current {})",
                self.session_id(),
                generation,
                inner.timer.generation()
            );
            return false;
        }

        let next = reset_round(&inner.state);
        inner.install(self.session_id(), next);

        tracing::info!("🔄 New round started in session {}", self.session_id());
        true
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionInner {
    /// Replace the state wholesale and publish it
    fn install(&mut self, session_id: &str, next: SessionState) {
        self.state = next;
        self.publish(session_id);
    }

    /// Send the current state to every registered channel
    ///
    /// A closed or full channel is logged and skipped; the others still
    /// receive the snapshot.
    ///
    /// # Returns
    ///
    /// Number of channels that accepted the snapshot
    fn publish(&self, session_id: &str) -> usize {
        let Some(payload) = Self::encode(session_id, &self.state) else {
            return 0;
        };

        tracing::debug!(
            "📢 Broadcasting state for session {} (phase: {:?})",
            session_id,
            self.state.phase()
        );

        self.channels
            .iter()
            .filter(|(role, channel)| {
                Self::deliver(session_id, **role, channel, payload.clone())
            })
            .count()
    }

    /// Send the current state to a single role
    fn resync(&self, session_id: &str, role: Role) {
        let Some(channel) = self.channels.get(&role) else {
            return;
        };
        if let Some(payload) = Self::encode(session_id, &self.state) {
            Self::deliver(session_id, role, channel, payload);
        }
    }

    /// Queue a snapshot without waiting for room
    fn deliver(
        session_id: &str,
        role: Role,
        channel: &ParticipantChannel,
        payload: String,
    ) -> bool {
        match channel.try_send(payload) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    "Outbound queue full for player {} in session {}, dropping state",
                    role,
                    session_id
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!(
                    "Failed to send state to player {} in session {}",
                    role,
                    session_id
                );
                false
            }
        }
    }

    fn encode(session_id: &str, state: &SessionState) -> Option<String> {
        match StateResponse::from(state).to_json() {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::error!("Failed to encode state for session {}: {}", session_id, e);
                None
            }
        }
    }
}
