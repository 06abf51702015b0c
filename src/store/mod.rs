//! Durable match state.
//!
//! The coordinator only talks to a [`MatchStore`]: an append log of
//! [`Snapshot`]s where the newest entry is the truth.

mod error;
mod memory;
mod snapshot;

pub use error::{SnapshotError, StoreError};
pub use memory::MemoryStore;
pub use snapshot::{EMPTY_CELL, Snapshot};

/// Append log of match snapshots.
pub trait MatchStore: Send {
    /// Appends a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    fn put(&mut self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Returns the most recently appended snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read fails.
    fn latest(&mut self) -> Result<Option<Snapshot>, StoreError>;

    /// Drops every snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the delete fails.
    fn clear(&mut self) -> Result<(), StoreError>;
}
