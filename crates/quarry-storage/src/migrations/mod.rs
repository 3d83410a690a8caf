//! Forward-only numbered migrations tracked in `schema_version`.

mod v001_documents_chunks;
mod v002_chunk_embeddings;
mod v003_fts5_index;

use rusqlite::Connection;
use tracing::info;

use quarry_core::errors::{QuarryResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> QuarryResult<()>;

const MIGRATIONS: [(u32, &str, MigrationFn); 3] = [
    (1, "documents_chunks", v001_documents_chunks::migrate),
    (2, "chunk_embeddings", v002_chunk_embeddings::migrate),
    (3, "fts5_index", v003_fts5_index::migrate),
];

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 3;

/// Apply every migration newer than the recorded version, each in its own
/// transaction. Returns the number applied.
pub fn run_migrations(conn: &Connection) -> QuarryResult<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, name, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| migration_err(version, e.to_string()))?;
        migrate(&tx).map_err(|e| migration_err(version, e.to_string()))?;
        tx.execute(
            "INSERT INTO schema_version (version, name) VALUES (?1, ?2)",
            rusqlite::params![version, name],
        )
        .map_err(|e| migration_err(version, e.to_string()))?;
        tx.commit()
            .map_err(|e| migration_err(version, e.to_string()))?;

        info!(version, name, "applied migration");
        applied += 1;
    }
    Ok(applied)
}

/// Recorded schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> QuarryResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

fn migration_err(version: u32, reason: String) -> quarry_core::QuarryError {
    StorageError::MigrationFailed { version, reason }.into()
}
