//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, foreign_keys ON, configurable busy_timeout.

use rusqlite::Connection;

use quarry_core::errors::QuarryResult;

use crate::to_storage_err;

/// Pragmas for the write connection.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> QuarryResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Pragmas for read-only connections. Journal mode is a property of the
/// database file and is already set by the writer.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> QuarryResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> QuarryResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
