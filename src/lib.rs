//! Tic-tac-toe match coordinator.
//!
//! Tracks one two-player match, validates moves against the turn, occupancy
//! and bounds rules, detects wins and draws, and keeps the newest state in a
//! snapshot log so the match survives a restart.
//!
//! # Architecture
//!
//! - **Game**: match data model and pure transition logic
//! - **Coordinator**: owns the live match, persists and publishes changes
//! - **Store**: snapshot encoding and the storage seam (SQLite or memory)
//! - **Server**: HTTP routes and websocket viewers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tictactoe_coordinator::{MatchCoordinator, MemoryStore, NullBroadcaster};
//!
//! let mut coordinator =
//!     MatchCoordinator::new(Box::new(MemoryStore::new()), Arc::new(NullBroadcaster));
//! coordinator.start_game("X");
//! coordinator.join_game();
//! let reply = coordinator.submit_move(1, 0, 0);
//! assert!(reply.as_move().is_some_and(|m| m.is_valid()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod broadcast;
mod cli;
mod config;
mod coordinator;
mod db;
mod game;
mod server;
mod store;

// Crate-level exports - Match model
pub use game::rules;
pub use game::{
    BOARD_SIZE, Board, Cell, FAILURE_CODE, FIRST_PLAYER_ID, InvalidType, JoinError, Mark,
    MatchState, Message, MoveError, MoveRequest, NO_TURN, NO_WINNER, Player, PlayerId,
    SUCCESS_CODE,
};

// Crate-level exports - Coordination
pub use broadcast::{Broadcaster, ChannelBroadcaster, NullBroadcaster};
pub use coordinator::{MatchCoordinator, NOT_CREATED, Reply};

// Crate-level exports - Persistence
pub use db::{DbError, MIGRATIONS, SnapshotRepository, SnapshotRow};
pub use store::{EMPTY_CELL, MatchStore, MemoryStore, Snapshot, SnapshotError, StoreError};

// Crate-level exports - Server and configuration
pub use cli::{Cli, Command};
pub use config::{ConfigError, ServerConfig};
pub use server::{AppState, MoveForm, StartForm, router, serve};
