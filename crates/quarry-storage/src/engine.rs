//! StorageEngine: owns the ConnectionPool, runs migrations at startup, and
//! implements `IChunkStore`.

use std::path::Path;

use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info};

use quarry_core::config::StorageConfig;
use quarry_core::errors::{QuarryError, QuarryResult, StorageError};
use quarry_core::models::{Chunk, ChunkId, DocumentRecord, NewDocument};
use quarry_core::traits::IChunkStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{chunk_ops, document_ops, lexical_search, vector_search};
use crate::recovery;

pub struct StorageEngine {
    pool: ConnectionPool,
    /// File-backed stores read through the pool; in-memory stores read
    /// through the writer, which holds the only copy of the database.
    use_read_pool: bool,
    dimensions: usize,
}

impl StorageEngine {
    /// Open a file-backed store holding embeddings of `dimensions` floats.
    pub fn open(path: &Path, dimensions: usize) -> QuarryResult<Self> {
        Self::open_with_config(path, &StorageConfig::default(), dimensions)
    }

    pub fn open_with_config(
        path: &Path,
        config: &StorageConfig,
        dimensions: usize,
    ) -> QuarryResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: true,
            dimensions,
        };
        engine.initialize()?;
        info!(path = %path.display(), dimensions, "storage engine opened");
        Ok(engine)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(dimensions: usize) -> QuarryResult<Self> {
        let pool = ConnectionPool::open_in_memory(StorageConfig::default().busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: false,
            dimensions,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> QuarryResult<()> {
        self.pool.writer.with_conn(|conn| {
            let applied = migrations::run_migrations(conn)?;
            debug!(applied, "migrations complete");
            Ok(())
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Rebuild the FTS5 index from the chunks table.
    pub fn rebuild_lexical_index(&self) -> QuarryResult<()> {
        self.pool.writer.with_conn(|conn| {
            recovery::rebuild_fts5_index(conn)?;
            info!("lexical index rebuilt");
            Ok(())
        })
    }

    /// Recorded schema version.
    pub fn schema_version(&self) -> QuarryResult<u32> {
        self.with_reader(migrations::current_version)
    }

    fn with_reader<F, T>(&self, f: F) -> QuarryResult<T>
    where
        F: FnOnce(&Connection) -> QuarryResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }

    /// Write a whole document inside an open transaction.
    fn write_document(&self, conn: &Connection, document: &NewDocument) -> QuarryResult<Vec<ChunkId>> {
        let now = Utc::now();
        let replaced = chunk_ops::delete_chunks_for_source(conn, &document.source)?;
        if replaced > 0 {
            debug!(source = %document.source, replaced, "replacing previous chunks");
        }
        document_ops::upsert_document(
            conn,
            &document.source,
            &document.content_hash,
            document.chunks.len(),
            now,
        )?;

        let mut ids = Vec::with_capacity(document.chunks.len());
        for chunk in &document.chunks {
            if chunk.embedding.len() != self.dimensions {
                return Err(StorageError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: chunk.embedding.len(),
                }
                .into());
            }
            let id = chunk_ops::insert_chunk(conn, &document.source, &chunk.content, now)?;
            chunk_ops::insert_embedding(conn, id, &chunk.embedding)?;
            ids.push(id);
        }
        Ok(ids)
    }
}

impl IChunkStore for StorageEngine {
    fn insert_document(&self, document: &NewDocument) -> QuarryResult<Vec<ChunkId>> {
        self.pool.writer.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| transaction_err(&document.source, format!("begin: {e}")))?;

            match self.write_document(&tx, document) {
                Ok(ids) => {
                    tx.commit()
                        .map_err(|e| transaction_err(&document.source, format!("commit: {e}")))?;
                    debug!(source = %document.source, chunks = ids.len(), "document committed");
                    Ok(ids)
                }
                Err(e) => {
                    let _ = tx.rollback();
                    Err(match e {
                        QuarryError::StorageError(StorageError::SqliteError { message }) => {
                            transaction_err(&document.source, message)
                        }
                        other => other,
                    })
                }
            }
        })
    }

    fn delete_document(&self, source: &str) -> QuarryResult<usize> {
        self.pool.writer.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| transaction_err(source, format!("begin: {e}")))?;
            let removed = document_ops::delete_document(&tx, source)?;
            tx.commit()
                .map_err(|e| transaction_err(source, format!("commit: {e}")))?;
            Ok(removed)
        })
    }

    fn document_exists(&self, source: &str) -> QuarryResult<bool> {
        self.with_reader(|conn| document_ops::document_exists(conn, source))
    }

    fn get_document(&self, source: &str) -> QuarryResult<Option<DocumentRecord>> {
        self.with_reader(|conn| document_ops::get_document(conn, source))
    }

    fn chunks_for_document(&self, source: &str) -> QuarryResult<Vec<Chunk>> {
        self.with_reader(|conn| chunk_ops::chunks_for_document(conn, source))
    }

    fn lexical_search(&self, expression: &str, limit: usize) -> QuarryResult<Vec<(Chunk, f64)>> {
        self.with_reader(|conn| lexical_search::search_fts5(conn, expression, limit))
    }

    fn vector_search(&self, query: &[f32], limit: usize) -> QuarryResult<Vec<(Chunk, f64)>> {
        if query.len() != self.dimensions {
            return Err(StorageError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            }
            .into());
        }
        self.with_reader(|conn| vector_search::search_vector(conn, query, limit))
    }

    fn chunk_count(&self) -> QuarryResult<usize> {
        self.with_reader(chunk_ops::chunk_count)
    }

    fn document_count(&self) -> QuarryResult<usize> {
        self.with_reader(document_ops::document_count)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn transaction_err(source: &str, reason: String) -> QuarryError {
    StorageError::TransactionFailed {
        source_document: source.to_string(),
        reason,
    }
    .into()
}
