//! Rebuild the FTS5 index from chunk content.

use rusqlite::Connection;

use quarry_core::errors::QuarryResult;

use crate::to_storage_err;

/// Rebuild the lexical index from scratch.
pub fn rebuild_fts5_index(conn: &Connection) -> QuarryResult<()> {
    conn.execute_batch("INSERT INTO chunk_fts(chunk_fts) VALUES('rebuild')")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
