//! # quarry-storage
//!
//! SQLite persistence for chunks, their FTS5 lexical index, and their
//! embeddings. One write connection, a round-robin read pool, WAL mode.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod recovery;

pub use engine::StorageEngine;

use quarry_core::errors::{QuarryError, StorageError};

/// Convert a displayable error into a `QuarryError::StorageError`.
pub(crate) fn to_storage_err(message: String) -> QuarryError {
    StorageError::SqliteError { message }.into()
}
