//! Tests for match transitions and move validation.

use tictactoe_coordinator::{
    Cell, FAILURE_CODE, JoinError, Mark, MatchState, Message, NO_TURN, NO_WINNER, Player,
    SUCCESS_CODE, rules,
};

/// Player1 is X, player2 has joined.
fn started_match() -> MatchState {
    let mut state = MatchState::create(Mark::X);
    state.join().expect("Join failed");
    state
}

fn play(state: &mut MatchState, moves: &[(i32, i32, i32)]) -> Message {
    let mut last = Message::accepted();
    for &(player, row, col) in moves {
        last = state.make_move(player, row, col);
    }
    last
}

fn assert_rejected(msg: &Message, text: &str) {
    assert!(!msg.is_valid());
    assert_eq!(*msg.code(), FAILURE_CODE);
    assert_eq!(msg.message(), text);
}

fn assert_accepted(msg: &Message) {
    assert!(msg.is_valid());
    assert_eq!(*msg.code(), SUCCESS_CODE);
    assert_eq!(msg.message(), "");
}

#[test]
fn test_join_assigns_opposite_type() {
    let mut x_first = MatchState::create(Mark::X);
    assert_eq!(x_first.join(), Ok(Player::new(Mark::O, 2)));
    assert!(x_first.started());

    let mut o_first = MatchState::create(Mark::O);
    assert_eq!(o_first.join(), Ok(Player::new(Mark::X, 2)));
    assert!(o_first.started());
}

#[test]
fn test_join_after_join_reports_in_progress() {
    let mut state = started_match();
    let before = state.clone();
    assert_eq!(state.join(), Err(JoinError::AlreadyStarted));
    assert_eq!(state, before);
}

#[test]
fn test_valid_moves_alternate_turn() {
    let mut state = started_match();

    let msg = state.make_move(1, 0, 0);
    assert_accepted(&msg);
    assert_eq!(state.board().get(0, 0), Some(Cell::Occupied(Mark::X)));
    assert_eq!(state.turn(), 2);

    let msg = state.make_move(2, 0, 1);
    assert_accepted(&msg);
    assert_eq!(state.board().get(0, 1), Some(Cell::Occupied(Mark::O)));
    assert_eq!(state.turn(), 1);
}

#[test]
fn test_player_one_as_o_places_o() {
    let mut state = MatchState::create(Mark::O);
    state.join().unwrap();
    state.make_move(1, 2, 2);
    assert_eq!(state.board().get(2, 2), Some(Cell::Occupied(Mark::O)));
}

#[test]
fn test_wrong_turn() {
    let mut state = started_match();
    let msg = state.make_move(2, 0, 0);
    assert_rejected(&msg, "Please wait for your turn!");
    assert_eq!(state.board().get(0, 0), Some(Cell::Empty));
    assert_eq!(state.turn(), 1);
}

#[test]
fn test_same_player_twice() {
    let mut state = started_match();
    state.make_move(1, 0, 0);
    let msg = state.make_move(1, 1, 1);
    assert_rejected(&msg, "Please wait for your turn!");
}

#[test]
fn test_slot_taken() {
    let mut state = started_match();
    state.make_move(1, 0, 0);
    let msg = state.make_move(2, 0, 0);
    assert_rejected(&msg, "Please select an open slot!");
    assert_eq!(state.board().get(0, 0), Some(Cell::Occupied(Mark::X)));
    assert_eq!(state.turn(), 2);
}

#[test]
fn test_out_of_bounds() {
    for (row, col) in [(-1, 0), (0, -1), (3, 0), (0, 3), (9, 9)] {
        let mut state = started_match();
        let before = state.clone();
        let msg = state.make_move(1, row, col);
        assert_rejected(&msg, "Not a valid move!");
        assert_eq!(state, before);
    }
}

#[test]
fn test_unknown_player() {
    let mut state = started_match();
    let msg = state.make_move(5, 0, 0);
    assert_rejected(&msg, "Unknown player!");
}

#[test]
fn test_move_before_join() {
    let mut state = MatchState::create(Mark::X);
    let msg = state.make_move(1, 0, 0);
    assert_rejected(&msg, "Game has not started yet!");
    assert_eq!(state.board().get(0, 0), Some(Cell::Empty));
}

#[test]
fn test_move_without_match() {
    let mut state = MatchState::empty();
    let msg = state.make_move(1, 0, 0);
    assert_rejected(&msg, "Game has not been created yet!");
    assert_eq!(state.turn(), NO_TURN);
}

#[test]
fn test_row_win() {
    let mut state = started_match();
    let msg = play(&mut state, &[(1, 0, 0), (2, 1, 0), (1, 0, 1), (2, 1, 1), (1, 0, 2)]);
    assert_accepted(&msg);
    assert_eq!(state.winner(), 1);
    assert!(!state.started());
    assert!(!state.draw());
}

#[test]
fn test_column_win() {
    let mut state = started_match();
    let msg = play(&mut state, &[(1, 0, 0), (2, 0, 1), (1, 1, 0), (2, 0, 2), (1, 2, 0)]);
    assert_accepted(&msg);
    assert_eq!(state.winner(), 1);
    assert!(!state.started());
}

#[test]
fn test_diagonal_wins() {
    let mut state = started_match();
    play(&mut state, &[(1, 0, 0), (2, 1, 0), (1, 1, 1), (2, 1, 2), (1, 2, 2)]);
    assert_eq!(state.winner(), 1);

    let mut state = started_match();
    play(&mut state, &[(1, 0, 2), (2, 1, 0), (1, 1, 1), (2, 1, 2), (1, 2, 0)]);
    assert_eq!(state.winner(), 1);
}

#[test]
fn test_player_two_can_win() {
    let mut state = started_match();
    play(
        &mut state,
        &[(1, 0, 0), (2, 1, 0), (1, 0, 1), (2, 1, 1), (1, 2, 2), (2, 1, 2)],
    );
    assert_eq!(state.winner(), 2);
    assert!(!state.started());
}

#[test]
fn test_draw() {
    let mut state = started_match();
    let msg = play(
        &mut state,
        &[
            (1, 0, 0),
            (2, 0, 1),
            (1, 0, 2),
            (2, 1, 1),
            (1, 1, 0),
            (2, 2, 0),
            (1, 1, 2),
            (2, 2, 2),
            (1, 2, 1),
        ],
    );
    assert_accepted(&msg);
    assert!(state.draw());
    assert_eq!(state.winner(), NO_WINNER);
    assert!(!state.started());
    assert!(rules::is_draw(state.board()));
}

#[test]
fn test_win_on_last_cell_is_not_draw() {
    let mut state = started_match();
    play(
        &mut state,
        &[
            (1, 0, 0),
            (2, 0, 1),
            (1, 0, 2),
            (2, 1, 0),
            (1, 1, 1),
            (2, 1, 2),
            (1, 2, 1),
            (2, 2, 0),
            (1, 2, 2),
        ],
    );
    assert_eq!(state.winner(), 1);
    assert!(!state.draw());
}

#[test]
fn test_moves_after_win_are_game_over() {
    let mut state = started_match();
    play(&mut state, &[(1, 0, 0), (2, 1, 0), (1, 0, 1), (2, 1, 1), (1, 0, 2)]);
    let before = state.clone();

    // Game over outranks every later check, including bad coordinates.
    for (player, row, col) in [(2, 2, 2), (1, 0, 0), (9, 7, 7)] {
        let msg = state.make_move(player, row, col);
        assert_rejected(&msg, "Game over!");
    }
    assert_eq!(state, before);
}

#[test]
fn test_moves_after_draw_are_game_over() {
    let mut state = started_match();
    play(
        &mut state,
        &[
            (1, 0, 0),
            (2, 0, 1),
            (1, 0, 2),
            (2, 1, 1),
            (1, 1, 0),
            (2, 2, 0),
            (1, 1, 2),
            (2, 2, 2),
            (1, 2, 1),
        ],
    );
    let msg = state.make_move(2, 0, 0);
    assert_rejected(&msg, "Game over!");
}

#[test]
fn test_not_started_outranks_bounds() {
    let mut state = MatchState::create(Mark::X);
    let msg = state.make_move(1, 5, 5);
    assert_rejected(&msg, "Game has not started yet!");
}
