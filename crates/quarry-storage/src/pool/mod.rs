//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use quarry_core::errors::QuarryResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The single write connection plus the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// The writer opens (and creates) the file before readers attach to it.
    pub fn open(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> QuarryResult<Self> {
        let writer = WriteConnection::open(path, busy_timeout_ms)?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// In-memory writer with no readers; every read goes through the writer.
    pub fn open_in_memory(busy_timeout_ms: u32) -> QuarryResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory(busy_timeout_ms)?,
            readers: ReadPool::empty(),
            db_path: None,
        })
    }
}
