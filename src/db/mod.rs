//! SQLite persistence for match snapshots.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{NewSnapshotRow, SnapshotRow};
pub use repository::{MIGRATIONS, SnapshotRepository};
