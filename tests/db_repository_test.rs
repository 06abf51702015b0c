//! Tests for the SQLite snapshot repository.

use std::sync::Arc;

use tempfile::NamedTempFile;

use tictactoe_coordinator::{
    Cell, Mark, MatchCoordinator, MatchState, MatchStore, NullBroadcaster, Snapshot,
    SnapshotRepository,
};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, SnapshotRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = SnapshotRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

fn mid_game() -> MatchState {
    let mut state = MatchState::create(Mark::O);
    state.join().expect("Join failed");
    state.make_move(1, 0, 0);
    state.make_move(2, 1, 1);
    state.make_move(1, 2, 2);
    state
}

#[test]
fn test_empty_log_has_no_latest() {
    let (_db, mut repo) = setup_test_db();
    assert!(repo.latest().expect("Query failed").is_none());
    assert!(repo.history().expect("Query failed").is_empty());
}

#[test]
fn test_round_trip_mid_game() {
    let (_db, mut repo) = setup_test_db();
    let state = mid_game();
    repo.put(&Snapshot::capture(&state)).expect("Put failed");

    let loaded = repo.latest().expect("Query failed").expect("Missing snapshot");
    assert_eq!(loaded.board_state(), "ONNNXNNNO");
    assert_eq!(loaded.restore().expect("Restore failed"), state);
}

#[test]
fn test_round_trip_empty_state() {
    let (_db, mut repo) = setup_test_db();
    repo.put(&Snapshot::capture(&MatchState::empty()))
        .expect("Put failed");

    let loaded = repo.latest().expect("Query failed").expect("Missing snapshot");
    assert_eq!(*loaded.p1_id(), None);
    assert_eq!(*loaded.p2_type(), None);
    assert_eq!(loaded.restore().expect("Restore failed"), MatchState::empty());
}

#[test]
fn test_round_trip_finished_match() {
    let (_db, mut repo) = setup_test_db();
    let mut state = MatchState::create(Mark::X);
    state.join().unwrap();
    for (player, row, col) in [(1, 0, 0), (2, 1, 0), (1, 1, 1), (2, 1, 2), (1, 2, 2)] {
        state.make_move(player, row, col);
    }
    assert_eq!(state.winner(), 1);
    repo.put(&Snapshot::capture(&state)).expect("Put failed");

    let restored = repo
        .latest()
        .expect("Query failed")
        .expect("Missing snapshot")
        .restore()
        .expect("Restore failed");
    assert_eq!(restored, state);
    assert_eq!(restored.winner(), 1);
    assert!(!restored.started());
}

#[test]
fn test_latest_is_newest_put() {
    let (_db, mut repo) = setup_test_db();
    let first = MatchState::create(Mark::X);
    let second = mid_game();
    repo.put(&Snapshot::capture(&first)).expect("Put failed");
    repo.put(&Snapshot::capture(&second)).expect("Put failed");

    let loaded = repo.latest().expect("Query failed").expect("Missing snapshot");
    assert_eq!(loaded.restore().unwrap(), second);
    assert_eq!(repo.history().expect("Query failed").len(), 2);
}

#[test]
fn test_clear_empties_log() {
    let (_db, mut repo) = setup_test_db();
    repo.put(&Snapshot::capture(&mid_game())).expect("Put failed");
    repo.put(&Snapshot::capture(&mid_game())).expect("Put failed");
    assert_eq!(repo.delete_all().expect("Delete failed"), 2);

    repo.clear().expect("Clear failed");
    assert!(repo.latest().expect("Query failed").is_none());
}

#[test]
fn test_reopen_keeps_rows() {
    let (db, mut repo) = setup_test_db();
    repo.put(&Snapshot::capture(&mid_game())).expect("Put failed");

    let path = db.path().to_str().unwrap().to_string();
    let mut reopened = SnapshotRepository::open(path).expect("Reopen failed");
    let loaded = reopened.latest().expect("Query failed").expect("Missing snapshot");
    assert_eq!(loaded.restore().unwrap(), mid_game());
}

#[test]
fn test_restart_durability_through_coordinator() {
    let (db, repo) = setup_test_db();
    let path = db.path().to_str().unwrap().to_string();

    let mut coordinator = MatchCoordinator::new(Box::new(repo), Arc::new(NullBroadcaster));
    coordinator.new_game();
    coordinator.start_game("X");
    coordinator.join_game();
    coordinator.submit_move(1, 0, 1);
    coordinator.submit_move(2, 0, 1); // rejected
    let before = coordinator.state().cloned().expect("Expected match");
    drop(coordinator);

    let repo = SnapshotRepository::open(path).expect("Reopen failed");
    let recovered = MatchCoordinator::recover(Box::new(repo), Arc::new(NullBroadcaster));
    let after = recovered.state().expect("Expected recovered match");

    assert_eq!(after, &before);
    assert_eq!(after.turn(), 2);
    assert_eq!(after.player1().map(|p| p.mark()), Some(Mark::X));
    assert_eq!(after.player2().map(|p| p.mark()), Some(Mark::O));
    assert_eq!(after.board().get(0, 1), Some(Cell::Occupied(Mark::X)));
}

#[test]
fn test_empty_path_is_rejected() {
    assert!(SnapshotRepository::new(String::new()).is_err());
}
