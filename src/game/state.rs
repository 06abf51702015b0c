//! The match state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::contracts::{LegalMove, MoveRequest};
use super::rules::{has_won, is_full, next_turn, second_player};
use super::{
    Board, Cell, InvalidType, JoinError, Mark, Message, MoveError, NO_TURN, NO_WINNER, Player,
    PlayerId,
};

/// Id given to the player who starts the match.
pub const FIRST_PLAYER_ID: PlayerId = 1;

/// Everything known about the live match.
///
/// Serializes to the client-facing JSON shape
/// (`p1`, `p2`, `gameStarted`, `turn`, `boardState`, `winner`, `isDraw`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    #[serde(rename = "p1", default, skip_serializing_if = "Option::is_none")]
    player1: Option<Player>,
    #[serde(rename = "p2", default, skip_serializing_if = "Option::is_none")]
    player2: Option<Player>,
    #[serde(rename = "gameStarted")]
    started: bool,
    turn: PlayerId,
    #[serde(rename = "boardState")]
    board: Board,
    winner: PlayerId,
    #[serde(rename = "isDraw")]
    draw: bool,
}

impl MatchState {
    /// A state with no players, as left by a new-game request.
    pub fn empty() -> Self {
        Self {
            player1: None,
            player2: None,
            started: false,
            turn: NO_TURN,
            board: Board::new(),
            winner: NO_WINNER,
            draw: false,
        }
    }

    /// Seats player1 with `mark`; player1 moves first.
    #[instrument]
    pub fn create(mark: Mark) -> Self {
        info!(%mark, "Creating match");
        Self {
            player1: Some(Player::new(mark, FIRST_PLAYER_ID)),
            turn: FIRST_PLAYER_ID,
            ..Self::empty()
        }
    }

    /// Parses the requested mark and creates the match.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidType`] unless `requested` is exactly `"X"` or `"O"`.
    #[instrument]
    pub fn start(requested: &str) -> Result<Self, InvalidType> {
        let mark = requested.parse::<Mark>().map_err(|_| InvalidType {
            requested: requested.to_string(),
        })?;
        Ok(Self::create(mark))
    }

    /// Rebuilds a state from stored fields without re-validating history.
    pub(crate) fn restore(
        player1: Option<Player>,
        player2: Option<Player>,
        started: bool,
        turn: PlayerId,
        board: Board,
        winner: PlayerId,
        draw: bool,
    ) -> Self {
        Self {
            player1,
            player2,
            started,
            turn,
            board,
            winner,
            draw,
        }
    }

    /// Returns player1, if seated.
    pub fn player1(&self) -> Option<&Player> {
        self.player1.as_ref()
    }

    /// Returns player2, if seated.
    pub fn player2(&self) -> Option<&Player> {
        self.player2.as_ref()
    }

    /// Looks up a seated player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        [self.player1.as_ref(), self.player2.as_ref()]
            .into_iter()
            .flatten()
            .find(|p| p.id() == id)
    }

    /// True while both players are seated and nobody has won or drawn.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Id of the player allowed to move next.
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Id of the winner, or [`NO_WINNER`].
    pub fn winner(&self) -> PlayerId {
        self.winner
    }

    /// True if the board filled up without a winner.
    pub fn draw(&self) -> bool {
        self.draw
    }

    /// True once the match has a winner or is drawn.
    pub fn is_finished(&self) -> bool {
        self.winner != NO_WINNER || self.draw
    }

    /// Seats player2 with the mark player1 did not take and starts play.
    ///
    /// # Errors
    ///
    /// [`JoinError::NoMatch`] without player1, [`JoinError::AlreadyStarted`]
    /// once player2 is seated.
    #[instrument(skip(self))]
    pub fn join(&mut self) -> Result<Player, JoinError> {
        let first = self.player1.ok_or(JoinError::NoMatch)?;
        if self.player2.is_some() {
            return Err(JoinError::AlreadyStarted);
        }
        let second = second_player(&first);
        self.player2 = Some(second);
        self.started = true;
        info!(player_id = second.id(), mark = %second.mark(), "Player joined");
        Ok(second)
    }

    /// Applies a move, reporting the outcome as a client [`Message`].
    ///
    /// A rejected move leaves the state untouched.
    #[instrument(skip(self))]
    pub fn make_move(&mut self, player_id: PlayerId, row: i32, col: i32) -> Message {
        self.try_move(MoveRequest::new(player_id, row, col)).into()
    }

    /// Validates and applies a move.
    ///
    /// # Errors
    ///
    /// The first failing precondition, in the order listed on [`MoveError`].
    #[instrument(skip(self))]
    pub fn try_move(&mut self, req: MoveRequest) -> Result<(), MoveError> {
        LegalMove::check(&req, self)?;

        let (Some(player1), Some(player2)) = (self.player1, self.player2) else {
            return Err(MoveError::NotStarted);
        };
        let mover = if req.player_id == player1.id() {
            player1
        } else {
            player2
        };

        self.board
            .set(req.row as usize, req.col as usize, Cell::Occupied(mover.mark()));

        if has_won(&self.board, mover.mark()) {
            info!(player_id = mover.id(), "Match won");
            self.winner = mover.id();
            self.started = false;
        } else if is_full(&self.board) {
            info!("Match drawn");
            self.draw = true;
            self.started = false;
        } else {
            self.turn = next_turn(self.turn, &player1, &player2);
            debug!(turn = self.turn, "Turn passed");
        }
        Ok(())
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FAILURE_CODE, SUCCESS_CODE};

    fn started_match() -> MatchState {
        let mut state = MatchState::create(Mark::X);
        state.join().unwrap();
        state
    }

    #[test]
    fn test_create_seats_player_one() {
        let state = MatchState::create(Mark::O);
        assert_eq!(state.player1(), Some(&Player::new(Mark::O, 1)));
        assert_eq!(state.player2(), None);
        assert_eq!(state.turn(), 1);
        assert!(!state.started());
        assert_eq!(state.winner(), NO_WINNER);
        assert!(!state.draw());
        assert!(state.board().cells().all(Cell::is_empty));
    }

    #[test]
    fn test_start_rejects_other_types() {
        assert!(MatchState::start("X").is_ok());
        let err = MatchState::start("Q").unwrap_err();
        assert_eq!(err.requested, "Q");
        assert_eq!(err.to_string(), "Please use either X or O to play.");
    }

    #[test]
    fn test_join_twice_is_rejected() {
        let mut state = started_match();
        assert_eq!(state.join(), Err(JoinError::AlreadyStarted));
    }

    #[test]
    fn test_join_without_match() {
        let mut state = MatchState::empty();
        assert_eq!(state.join(), Err(JoinError::NoMatch));
        assert_eq!(state, MatchState::empty());
    }

    #[test]
    fn test_failed_move_does_not_mutate() {
        let mut state = started_match();
        let before = state.clone();
        let msg = state.make_move(2, 0, 0);
        assert_eq!(*msg.code(), FAILURE_CODE);
        assert_eq!(state, before);
    }

    #[test]
    fn test_valid_move_flips_turn() {
        let mut state = started_match();
        let msg = state.make_move(1, 1, 1);
        assert_eq!(*msg.code(), SUCCESS_CODE);
        assert_eq!(state.board().get(1, 1), Some(Cell::Occupied(Mark::X)));
        assert_eq!(state.turn(), 2);
    }

    #[test]
    fn test_bounds_checked_before_player() {
        let mut state = started_match();
        assert_eq!(
            state.try_move(MoveRequest::new(7, 3, 0)),
            Err(MoveError::OutOfBounds)
        );
    }

    #[test]
    fn test_unknown_player_checked_before_turn() {
        let mut state = started_match();
        assert_eq!(
            state.try_move(MoveRequest::new(3, 0, 0)),
            Err(MoveError::UnknownPlayer)
        );
    }

    #[test]
    fn test_serialized_shape() {
        let state = started_match();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["p1"], serde_json::json!({"type": "X", "id": 1}));
        assert_eq!(json["p2"], serde_json::json!({"type": "O", "id": 2}));
        assert_eq!(json["gameStarted"], true);
        assert_eq!(json["turn"], 1);
        assert_eq!(json["winner"], 0);
        assert_eq!(json["isDraw"], false);
        assert_eq!(json["boardState"][0][0], serde_json::Value::Null);
    }

    #[test]
    fn test_empty_state_omits_players() {
        let json = serde_json::to_value(MatchState::empty()).unwrap();
        assert!(json.get("p1").is_none());
        assert!(json.get("p2").is_none());
        assert_eq!(json["turn"], -1);
    }
}
