//! Process-local store.

use tracing::{debug, instrument};

use super::{MatchStore, Snapshot, StoreError};

/// Keeps snapshots in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    log: Vec<Snapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots appended since the last clear.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// True if nothing has been appended since the last clear.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

impl MatchStore for MemoryStore {
    #[instrument(skip(self, snapshot))]
    fn put(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.log.push(snapshot.clone());
        debug!(entries = self.log.len(), "Snapshot appended");
        Ok(())
    }

    #[instrument(skip(self))]
    fn latest(&mut self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.log.last().cloned())
    }

    #[instrument(skip(self))]
    fn clear(&mut self) -> Result<(), StoreError> {
        self.log.clear();
        Ok(())
    }
}
