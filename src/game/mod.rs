//! Match data model and transition logic. No I/O.

mod contracts;
mod error;
mod message;
pub mod rules;
mod state;
mod types;

pub use contracts::MoveRequest;
pub use error::{InvalidType, JoinError, MoveError};
pub use message::{FAILURE_CODE, Message, SUCCESS_CODE};
pub use state::{FIRST_PLAYER_ID, MatchState};
pub use types::{BOARD_SIZE, Board, Cell, Mark, NO_TURN, NO_WINNER, Player, PlayerId};
