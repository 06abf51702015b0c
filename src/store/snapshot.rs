//! Flat snapshot encoding of a [`MatchState`].

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::SnapshotError;
use crate::game::rules::{has_won, is_draw, winning_mark};
use crate::game::{BOARD_SIZE, Board, Cell, Mark, MatchState, NO_TURN, NO_WINNER, Player};

/// Character standing for an empty cell in `board_state`.
pub const EMPTY_CELL: char = 'N';

/// One row of the snapshot log.
///
/// Players are stored as nullable id/type pairs and the board as nine
/// characters in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Snapshot {
    p1_id: Option<i32>,
    p1_type: Option<String>,
    p2_id: Option<i32>,
    p2_type: Option<String>,
    game_started: bool,
    turn: i32,
    board_state: String,
    winner: i32,
    is_draw: bool,
}

impl Snapshot {
    /// Flattens a match state.
    #[instrument(skip(state))]
    pub fn capture(state: &MatchState) -> Self {
        let (p1_id, p1_type) = split_player(state.player1());
        let (p2_id, p2_type) = split_player(state.player2());
        Self {
            p1_id,
            p1_type,
            p2_id,
            p2_type,
            game_started: state.started(),
            turn: state.turn(),
            board_state: encode_board(state.board()),
            winner: state.winner(),
            is_draw: state.draw(),
        }
    }

    /// Rebuilds the match state.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when a player is half-present, a type is not
    /// `X`/`O`, the board is not nine `X`/`O`/`N` characters, or the decoded
    /// fields do not form a reachable match (see [`check_consistent`]).
    #[instrument(skip(self))]
    pub fn restore(&self) -> Result<MatchState, SnapshotError> {
        let player1 = join_player("p1", self.p1_id, self.p1_type.as_deref())?;
        let player2 = join_player("p2", self.p2_id, self.p2_type.as_deref())?;
        let board = decode_board(&self.board_state)?;
        let state = MatchState::restore(
            player1,
            player2,
            self.game_started,
            self.turn,
            board,
            self.winner,
            self.is_draw,
        );
        check_consistent(&state)?;
        Ok(state)
    }
}

fn split_player(player: Option<&Player>) -> (Option<i32>, Option<String>) {
    match player {
        Some(p) => (Some(p.id()), Some(p.mark().to_string())),
        None => (None, None),
    }
}

fn join_player(
    slot: &str,
    id: Option<i32>,
    mark: Option<&str>,
) -> Result<Option<Player>, SnapshotError> {
    match (id, mark) {
        (None, None) => Ok(None),
        (Some(id), Some(mark)) => {
            let mark = mark
                .parse::<Mark>()
                .map_err(|_| SnapshotError::new(format!("{slot} has invalid type '{mark}'")))?;
            Ok(Some(Player::new(mark, id)))
        }
        _ => Err(SnapshotError::new(format!(
            "{slot} must have both id and type or neither"
        ))),
    }
}

/// Checks the cross-field rules every live match obeys.
///
/// Players have positive ids; player2 is only seated next to player1, with
/// the other mark and another id. Without players the turn is `-1` and the
/// board is empty, and marks appear only once player2 has joined. With
/// players the turn belongs to one of them. A win names a seated player
/// whose mark completes a line, a draw needs a full board without one, the two never
/// hold together, and either one ends play.
///
/// # Errors
///
/// Returns [`SnapshotError`] naming the first broken rule.
pub fn check_consistent(state: &MatchState) -> Result<(), SnapshotError> {
    let (player1, player2) = (state.player1(), state.player2());

    for player in [player1, player2].into_iter().flatten() {
        if player.id() <= 0 {
            return Err(SnapshotError::new(format!(
                "player id {} is not positive",
                player.id()
            )));
        }
    }

    match (player1, player2) {
        (None, Some(_)) => return Err(SnapshotError::new("p2 seated without p1")),
        (Some(a), Some(b)) if a.mark() == b.mark() => {
            return Err(SnapshotError::new(format!("both players play {}", a.mark())));
        }
        (Some(a), Some(b)) if a.id() == b.id() => {
            return Err(SnapshotError::new(format!("both players have id {}", a.id())));
        }
        _ => {}
    }

    if player1.is_none() {
        if state.turn() != NO_TURN {
            return Err(SnapshotError::new(format!(
                "turn {} without players",
                state.turn()
            )));
        }
    } else if state.player(state.turn()).is_none() {
        return Err(SnapshotError::new(format!(
            "turn {} belongs to no seated player",
            state.turn()
        )));
    }

    if player2.is_none() && state.board().cells().any(|cell| !cell.is_empty()) {
        return Err(SnapshotError::new("marks on the board before p2 joined"));
    }

    if state.winner() != NO_WINNER && state.draw() {
        return Err(SnapshotError::new("both a winner and a draw"));
    }

    if state.winner() != NO_WINNER {
        let winner = state.player(state.winner()).ok_or_else(|| {
            SnapshotError::new(format!("winner {} is not seated", state.winner()))
        })?;
        if !has_won(state.board(), winner.mark()) {
            return Err(SnapshotError::new(format!(
                "winner {} has no completed line",
                winner.id()
            )));
        }
    }

    if state.draw() && !is_draw(state.board()) {
        return Err(SnapshotError::new("draw on a board that is not drawn"));
    }

    if !state.is_finished() && winning_mark(state.board()).is_some() {
        return Err(SnapshotError::new("completed line without a winner"));
    }

    if state.started() && (player2.is_none() || state.is_finished()) {
        return Err(SnapshotError::new(
            "started without both players or after the match ended",
        ));
    }

    Ok(())
}

/// Encodes the board as nine characters, [`EMPTY_CELL`] for empty cells.
pub fn encode_board(board: &Board) -> String {
    board
        .cells()
        .map(|cell| cell.mark().map_or(EMPTY_CELL, Mark::as_char))
        .collect()
}

/// Parses the nine-character board encoding.
///
/// # Errors
///
/// Returns [`SnapshotError`] on a wrong length or an unknown character.
pub fn decode_board(encoded: &str) -> Result<Board, SnapshotError> {
    let chars: Vec<char> = encoded.chars().collect();
    if chars.len() != BOARD_SIZE * BOARD_SIZE {
        return Err(SnapshotError::new(format!(
            "board must have {} cells, got {}",
            BOARD_SIZE * BOARD_SIZE,
            chars.len()
        )));
    }

    let mut rows = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (i, c) in chars.into_iter().enumerate() {
        rows[i / BOARD_SIZE][i % BOARD_SIZE] = match c {
            EMPTY_CELL => Cell::Empty,
            other => Mark::from_char(other)
                .map(Cell::Occupied)
                .ok_or_else(|| SnapshotError::new(format!("unknown cell '{other}'")))?,
        };
    }
    Ok(Board::from_rows(rows))
}
