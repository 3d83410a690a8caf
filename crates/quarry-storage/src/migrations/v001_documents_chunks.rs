//! v001: documents and chunks.

use rusqlite::Connection;

use quarry_core::errors::QuarryResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> QuarryResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            source       TEXT PRIMARY KEY,
            content_hash TEXT NOT NULL,
            chunk_count  INTEGER NOT NULL DEFAULT 0,
            ingested_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS chunks (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            content    TEXT NOT NULL,
            source     TEXT NOT NULL REFERENCES documents(source) ON DELETE CASCADE,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_chunks_source ON chunks(source);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
