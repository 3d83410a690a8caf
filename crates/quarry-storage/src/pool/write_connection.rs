//! Single write connection behind a mutex. Writes are serialized.
//!
//! Callers on an async runtime reach it through `spawn_blocking`.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use quarry_core::errors::QuarryResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> QuarryResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory(busy_timeout_ms: u32) -> QuarryResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and run `f` with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> QuarryResult<T>
    where
        F: FnOnce(&Connection) -> QuarryResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        f(&guard)
    }
}
