//! Rejections raised by match transitions.

use derive_more::{Display, Error};

/// Reason a move was refused. The display text is sent to clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// No player1 yet.
    #[display("Game has not been created yet!")]
    NoMatch,
    /// Somebody won or the board filled up.
    #[display("Game over!")]
    GameOver,
    /// Player2 has not joined.
    #[display("Game has not started yet!")]
    NotStarted,
    /// Row or column outside `0..=2`.
    #[display("Not a valid move!")]
    OutOfBounds,
    /// Id is neither player1 nor player2.
    #[display("Unknown player!")]
    UnknownPlayer,
    /// The other player holds the turn.
    #[display("Please wait for your turn!")]
    WrongTurn,
    /// Target cell already holds a mark.
    #[display("Please select an open slot!")]
    SlotTaken,
}

/// Reason a join was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum JoinError {
    /// No player1 to join.
    #[display("Game has not been created yet")]
    NoMatch,
    /// Player2 is already seated.
    #[display("Another user is playing the game.")]
    AlreadyStarted,
}

/// The requested mark is not `X` or `O`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Please use either X or O to play.")]
pub struct InvalidType {
    /// What the caller sent.
    pub requested: String,
}
