//! Owner of the single live match.
//!
//! Every request goes through [`MatchCoordinator`], which applies it to the
//! [`MatchState`], appends a snapshot to the [`MatchStore`] when the state
//! changed, and pushes the new state to the [`Broadcaster`]. Callers must
//! serialize access (the HTTP layer holds it behind a mutex).

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::broadcast::Broadcaster;
use crate::game::{JoinError, MatchState, Message, PlayerId};
use crate::store::{MatchStore, Snapshot};

/// Plain reply when there is no match to act on.
pub const NOT_CREATED: &str = "Game has not been created yet";

/// What a request produced, in the shape the client expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Serialized match state.
    State(MatchState),
    /// Structured move result.
    Move(Message),
    /// Plain text outside the structured protocol.
    Notice(String),
    /// Nothing to say; empty body.
    Silent,
}

impl Reply {
    /// Returns the carried state, if any.
    pub fn as_state(&self) -> Option<&MatchState> {
        match self {
            Reply::State(state) => Some(state),
            _ => None,
        }
    }

    /// Returns the carried move message, if any.
    pub fn as_move(&self) -> Option<&Message> {
        match self {
            Reply::Move(msg) => Some(msg),
            _ => None,
        }
    }

    /// Returns the carried notice text, if any.
    pub fn as_notice(&self) -> Option<&str> {
        match self {
            Reply::Notice(text) => Some(text),
            _ => None,
        }
    }
}

/// Coordinates the live match with storage and viewers.
pub struct MatchCoordinator {
    state: Option<MatchState>,
    store: Box<dyn MatchStore>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl std::fmt::Debug for MatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCoordinator")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl MatchCoordinator {
    /// Creates a coordinator with no match configured.
    pub fn new(store: Box<dyn MatchStore>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            state: None,
            store,
            broadcaster,
        }
    }

    /// Creates a coordinator and adopts the newest stored snapshot.
    ///
    /// A missing or unreadable snapshot leaves no match configured.
    #[instrument(skip(store, broadcaster))]
    pub fn recover(store: Box<dyn MatchStore>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        let mut coordinator = Self::new(store, broadcaster);
        coordinator.state = match coordinator.store.latest() {
            Ok(Some(snapshot)) => match snapshot.restore() {
                Ok(state) => {
                    info!(turn = state.turn(), started = state.started(), "Recovered match");
                    Some(state)
                }
                Err(e) => {
                    warn!(error = %e, "Stored snapshot unreadable, starting without a match");
                    None
                }
            },
            Ok(None) => {
                info!("No stored match");
                None
            }
            Err(e) => {
                warn!(error = %e, "Could not read store, starting without a match");
                None
            }
        };
        coordinator
    }

    /// The live match, if one has been configured.
    pub fn state(&self) -> Option<&MatchState> {
        self.state.as_ref()
    }

    /// Discards any match and stores an empty one.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Reply {
        if let Err(e) = self.store.clear() {
            error!(error = %e, "Failed to clear store");
        }
        let state = MatchState::empty();
        self.persist(&state);
        self.state = Some(state.clone());
        info!("New game requested");
        Reply::State(state)
    }

    /// Replaces the match with one where player1 plays `requested`.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, requested: &str) -> Reply {
        let state = match MatchState::start(requested) {
            Ok(state) => state,
            Err(e) => {
                warn!(requested, "Rejected start with invalid type");
                return Reply::Notice(e.to_string());
            }
        };
        if let Err(e) = self.store.clear() {
            error!(error = %e, "Failed to clear store");
        }
        self.persist(&state);
        self.state = Some(state.clone());
        Reply::State(state)
    }

    /// Seats player2.
    #[instrument(skip(self))]
    pub fn join_game(&mut self) -> Reply {
        let Some(state) = self.state.as_mut() else {
            debug!("Join before any match exists");
            return Reply::Silent;
        };
        match state.join() {
            Ok(_) => {
                let state = state.clone();
                self.persist(&state);
                self.publish(&state);
                Reply::State(state)
            }
            Err(JoinError::NoMatch) => {
                debug!("Join before player1 exists");
                Reply::Silent
            }
            Err(e @ JoinError::AlreadyStarted) => {
                info!("Join refused, match in progress");
                Reply::Notice(e.to_string())
            }
        }
    }

    /// Submits a move for `player_id` at `(row, col)`.
    ///
    /// Viewers see the state after every submission; only accepted moves are
    /// stored.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, player_id: PlayerId, row: i32, col: i32) -> Reply {
        let Some(state) = self.state.as_mut().filter(|s| s.player1().is_some()) else {
            debug!("Move before any match exists");
            return Reply::Notice(NOT_CREATED.to_string());
        };
        let msg = state.make_move(player_id, row, col);
        let state = state.clone();
        self.publish(&state);
        if msg.is_valid() {
            self.persist(&state);
        }
        Reply::Move(msg)
    }

    /// The live match, or a notice when there is none.
    #[instrument(skip(self))]
    pub fn current_state(&self) -> Reply {
        match &self.state {
            Some(state) => Reply::State(state.clone()),
            None => Reply::Notice(NOT_CREATED.to_string()),
        }
    }

    fn persist(&mut self, state: &MatchState) {
        if let Err(e) = self.store.put(&Snapshot::capture(state)) {
            error!(error = %e, "Failed to store snapshot");
        }
    }

    fn publish(&self, state: &MatchState) {
        match serde_json::to_string(state) {
            Ok(payload) => self.broadcaster.publish(payload),
            Err(e) => warn!(error = %e, "Failed to serialize state for viewers"),
        }
    }
}
