//! Database models for the snapshot log.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use diesel::prelude::*;

use crate::db::schema;
use crate::store::Snapshot;

/// A stored snapshot row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::match_snapshots)]
pub struct SnapshotRow {
    id: i32,
    p1_id: Option<i32>,
    p1_type: Option<String>,
    p2_id: Option<i32>,
    p2_type: Option<String>,
    game_started: bool,
    turn: i32,
    board_state: String,
    winner: i32,
    is_draw: bool,
    recorded_at: NaiveDateTime,
}

impl From<SnapshotRow> for Snapshot {
    fn from(row: SnapshotRow) -> Self {
        Snapshot::new(
            row.p1_id,
            row.p1_type,
            row.p2_id,
            row.p2_type,
            row.game_started,
            row.turn,
            row.board_state,
            row.winner,
            row.is_draw,
        )
    }
}

/// Insertable snapshot row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::match_snapshots)]
pub struct NewSnapshotRow {
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

impl From<&Snapshot> for NewSnapshotRow {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            p1_id: *snapshot.p1_id(),
            p1_type: snapshot.p1_type().clone(),
            p2_id: *snapshot.p2_id(),
            p2_type: snapshot.p2_type().clone(),
            game_started: *snapshot.game_started(),
            turn: *snapshot.turn(),
            board_state: snapshot.board_state().clone(),
            winner: *snapshot.winner(),
            is_draw: *snapshot.is_draw(),
        }
    }
}
