//! v002: one embedding per chunk, stored as a little-endian f32 blob.

use rusqlite::Connection;

use quarry_core::errors::QuarryResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> QuarryResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS chunk_embeddings (
            chunk_id   INTEGER PRIMARY KEY REFERENCES chunks(id) ON DELETE CASCADE,
            embedding  BLOB NOT NULL,
            dimensions INTEGER NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
