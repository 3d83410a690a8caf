//! Chunk rows and their embeddings.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use quarry_core::errors::QuarryResult;
use quarry_core::models::{Chunk, ChunkId};

use super::document_ops::parse_timestamp;
use super::vector_search::f32_vec_to_bytes;
use crate::to_storage_err;

/// Column list matching [`parse_chunk_row`].
pub(crate) const CHUNK_COLUMNS: &str = "c.id, c.content, c.source, c.created_at";

/// Insert one chunk; the FTS row is added by trigger. Returns the new id.
pub fn insert_chunk(
    conn: &Connection,
    source: &str,
    content: &str,
    created_at: DateTime<Utc>,
) -> QuarryResult<ChunkId> {
    conn.execute(
        "INSERT INTO chunks (content, source, created_at) VALUES (?1, ?2, ?3)",
        params![content, source, created_at.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_embedding(conn: &Connection, chunk_id: ChunkId, embedding: &[f32]) -> QuarryResult<()> {
    conn.execute(
        "INSERT INTO chunk_embeddings (chunk_id, embedding, dimensions) VALUES (?1, ?2, ?3)",
        params![chunk_id, f32_vec_to_bytes(embedding), embedding.len() as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_chunk(conn: &Connection, id: ChunkId) -> QuarryResult<Option<Chunk>> {
    let sql = format!("SELECT {CHUNK_COLUMNS} FROM chunks c WHERE c.id = ?1");
    let raw = conn
        .query_row(&sql, params![id], read_raw)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawChunk::into_chunk).transpose()
}

/// Chunks of one source in insertion order.
pub fn chunks_for_document(conn: &Connection, source: &str) -> QuarryResult<Vec<Chunk>> {
    let sql = format!("SELECT {CHUNK_COLUMNS} FROM chunks c WHERE c.source = ?1 ORDER BY c.id");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![source], read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut chunks = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        chunks.push(raw.into_chunk()?);
    }
    Ok(chunks)
}

pub fn delete_chunks_for_source(conn: &Connection, source: &str) -> QuarryResult<usize> {
    conn.execute("DELETE FROM chunks WHERE source = ?1", params![source])
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn chunk_count(conn: &Connection) -> QuarryResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

/// Column values as read; the timestamp is parsed outside the rusqlite closure.
pub(crate) struct RawChunk {
    id: ChunkId,
    content: String,
    source: String,
    created_at: String,
}

impl RawChunk {
    pub(crate) fn into_chunk(self) -> QuarryResult<Chunk> {
        Ok(Chunk {
            id: self.id,
            content: self.content,
            source_document: self.source,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Read the [`CHUNK_COLUMNS`] at the start of a row.
pub(crate) fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawChunk> {
    Ok(RawChunk {
        id: row.get(0)?,
        content: row.get(1)?,
        source: row.get(2)?,
        created_at: row.get(3)?,
    })
}
