//! Database repository for the snapshot log.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, NewSnapshotRow, SnapshotRow, schema};
use crate::store::{MatchStore, Snapshot, StoreError};

/// Schema migrations shipped with the crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite-backed snapshot log.
///
/// Opens a fresh connection per operation, so the path must name a file;
/// `":memory:"` would lose every write. Use
/// [`MemoryStore`](crate::store::MemoryStore) for throwaway state.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    db_path: String,
}

impl SnapshotRepository {
    /// Creates a repository for the database at the given path without
    /// touching the schema.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating SnapshotRepository");
        Ok(Self { db_path })
    }

    /// Creates a repository and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repo = Self::new(db_path)?;
        repo.migrate()?;
        Ok(repo)
    }

    /// Applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(DbError::migration)?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Appends a snapshot row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, snapshot), fields(turn = snapshot.turn(), winner = snapshot.winner()))]
    pub fn insert(&self, snapshot: &Snapshot) -> Result<SnapshotRow, DbError> {
        let mut conn = self.connection()?;

        let row: SnapshotRow = diesel::insert_into(schema::match_snapshots::table)
            .values(NewSnapshotRow::from(snapshot))
            .returning(SnapshotRow::as_returning())
            .get_result(&mut conn)?;

        debug!(row_id = row.id(), board = %row.board_state(), "Snapshot stored");
        Ok(row)
    }

    /// Gets the newest snapshot row. Returns `None` if the log is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn newest(&self) -> Result<Option<SnapshotRow>, DbError> {
        let mut conn = self.connection()?;

        let row: Option<SnapshotRow> = schema::match_snapshots::table
            .order(schema::match_snapshots::id.desc())
            .select(SnapshotRow::as_select())
            .first(&mut conn)
            .optional()?;

        match &row {
            Some(r) => debug!(row_id = r.id(), "Newest snapshot found"),
            None => debug!("Snapshot log is empty"),
        }
        Ok(row)
    }

    /// Lists every snapshot row, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn history(&self) -> Result<Vec<SnapshotRow>, DbError> {
        let mut conn = self.connection()?;

        let rows: Vec<SnapshotRow> = schema::match_snapshots::table
            .order(schema::match_snapshots::id.asc())
            .select(SnapshotRow::as_select())
            .load(&mut conn)?;

        debug!(count = rows.len(), "Snapshot history loaded");
        Ok(rows)
    }

    /// Deletes every snapshot row, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_all(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::match_snapshots::table).execute(&mut conn)?;
        info!(removed, "Snapshot log cleared");
        Ok(removed)
    }
}

impl MatchStore for SnapshotRepository {
    fn put(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.insert(snapshot)?;
        Ok(())
    }

    fn latest(&mut self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.newest()?.map(Snapshot::from))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.delete_all()?;
        Ok(())
    }
}
