//! Document rows: one per ingested source.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use quarry_core::errors::QuarryResult;
use quarry_core::models::DocumentRecord;

use crate::to_storage_err;

/// Insert or refresh the row for `source`.
pub fn upsert_document(
    conn: &Connection,
    source: &str,
    content_hash: &str,
    chunk_count: usize,
    ingested_at: DateTime<Utc>,
) -> QuarryResult<()> {
    conn.execute(
        "INSERT INTO documents (source, content_hash, chunk_count, ingested_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(source) DO UPDATE SET
            content_hash = excluded.content_hash,
            chunk_count = excluded.chunk_count,
            ingested_at = excluded.ingested_at",
        params![source, content_hash, chunk_count as i64, ingested_at.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_document(conn: &Connection, source: &str) -> QuarryResult<Option<DocumentRecord>> {
    let row = conn
        .query_row(
            "SELECT source, content_hash, chunk_count, ingested_at
             FROM documents WHERE source = ?1",
            params![source],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    row.map(|(source, content_hash, chunk_count, ingested_at)| {
        Ok(DocumentRecord {
            source,
            content_hash,
            chunk_count: chunk_count.max(0) as usize,
            ingested_at: parse_timestamp(&ingested_at)?,
        })
    })
    .transpose()
}

pub fn document_exists(conn: &Connection, source: &str) -> QuarryResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM documents WHERE source = ?1)",
        params![source],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Delete a document and its chunks. Returns the number of chunks removed.
///
/// Chunks are deleted explicitly so the FTS delete trigger fires for each;
/// embeddings follow through `ON DELETE CASCADE`.
pub fn delete_document(conn: &Connection, source: &str) -> QuarryResult<usize> {
    let removed = super::chunk_ops::delete_chunks_for_source(conn, source)?;
    conn.execute("DELETE FROM documents WHERE source = ?1", params![source])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(removed)
}

pub fn document_count(conn: &Connection) -> QuarryResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

pub(crate) fn parse_timestamp(value: &str) -> QuarryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("invalid timestamp {value:?}: {e}")))
}
