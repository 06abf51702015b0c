//! Preconditions for a move.
//!
//! Each check inspects the match without touching it. [`LegalMove`] runs them
//! in the fixed order clients rely on, so the first failure decides the
//! reported reason.

use super::{Board, MatchState, MoveError, PlayerId};
use tracing::{instrument, warn};

/// A proposed move before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct MoveRequest {
    /// Acting player.
    pub player_id: PlayerId,
    /// Target row.
    pub row: i32,
    /// Target column.
    pub col: i32,
}

/// Precondition: player1 exists.
pub struct MatchConfigured;

impl MatchConfigured {
    /// Checks the precondition.
    pub fn check(state: &MatchState) -> Result<(), MoveError> {
        state.player1().map(|_| ()).ok_or(MoveError::NoMatch)
    }
}

/// Precondition: no terminal outcome yet.
pub struct NotFinished;

impl NotFinished {
    /// Checks the precondition.
    pub fn check(state: &MatchState) -> Result<(), MoveError> {
        if state.is_finished() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: both players are seated.
pub struct Started;

impl Started {
    /// Checks the precondition.
    pub fn check(state: &MatchState) -> Result<(), MoveError> {
        if state.started() {
            Ok(())
        } else {
            Err(MoveError::NotStarted)
        }
    }
}

/// Precondition: target lies on the board.
pub struct InBounds;

impl InBounds {
    /// Checks the precondition.
    pub fn check(req: &MoveRequest) -> Result<(), MoveError> {
        if Board::in_bounds(req.row, req.col) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds)
        }
    }
}

/// Precondition: the mover is seated in this match.
pub struct KnownPlayer;

impl KnownPlayer {
    /// Checks the precondition.
    pub fn check(req: &MoveRequest, state: &MatchState) -> Result<(), MoveError> {
        state
            .player(req.player_id)
            .map(|_| ())
            .ok_or(MoveError::UnknownPlayer)
    }
}

/// Precondition: the mover holds the turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the precondition.
    pub fn check(req: &MoveRequest, state: &MatchState) -> Result<(), MoveError> {
        if req.player_id == state.turn() {
            Ok(())
        } else {
            Err(MoveError::WrongTurn)
        }
    }
}

/// Precondition: the target cell is empty. Assumes [`InBounds`] passed.
pub struct CellIsOpen;

impl CellIsOpen {
    /// Checks the precondition.
    pub fn check(req: &MoveRequest, state: &MatchState) -> Result<(), MoveError> {
        match state.board().get(req.row as usize, req.col as usize) {
            Some(cell) if cell.is_empty() => Ok(()),
            _ => Err(MoveError::SlotTaken),
        }
    }
}

/// All move preconditions in evaluation order.
pub struct LegalMove;

impl LegalMove {
    /// Validates a move, returning the first failing precondition.
    #[instrument(skip(state))]
    pub fn check(req: &MoveRequest, state: &MatchState) -> Result<(), MoveError> {
        let result = MatchConfigured::check(state)
            .and_then(|_| NotFinished::check(state))
            .and_then(|_| Started::check(state))
            .and_then(|_| InBounds::check(req))
            .and_then(|_| KnownPlayer::check(req, state))
            .and_then(|_| PlayersTurn::check(req, state))
            .and_then(|_| CellIsOpen::check(req, state));
        if let Err(error) = result {
            warn!(player_id = req.player_id, row = req.row, col = req.col, %error, "Move rejected");
        }
        result
    }
}
