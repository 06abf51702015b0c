//! Rules for a tic-tac-toe match.
//!
//! Pure functions over the board and players. They hold no state and are
//! called by [`MatchState`](super::MatchState) during a move, but each can be
//! exercised on its own.

pub mod draw;
pub mod turn;
pub mod win;

pub use draw::{is_draw, is_full};
pub use turn::{next_turn, second_player};
pub use win::{has_won, winning_mark};
