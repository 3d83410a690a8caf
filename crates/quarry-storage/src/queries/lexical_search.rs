//! FTS5 full-text search.

use rusqlite::{params, Connection};

use quarry_core::errors::QuarryResult;
use quarry_core::models::Chunk;

use super::chunk_ops::{read_raw, CHUNK_COLUMNS};
use crate::to_storage_err;

/// Search chunks matching an FTS5 expression, best first.
///
/// The score is the negated `bm25`, so higher is more relevant. An empty
/// expression matches nothing.
pub fn search_fts5(conn: &Connection, expression: &str, limit: usize) -> QuarryResult<Vec<(Chunk, f64)>> {
    if expression.trim().is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT {CHUNK_COLUMNS}, bm25(chunk_fts) AS score
         FROM chunk_fts
         JOIN chunks c ON c.id = chunk_fts.rowid
         WHERE chunk_fts MATCH ?1
         ORDER BY score, c.id
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![expression, limit as i64], |row| {
            Ok((read_raw(row)?, row.get::<_, f64>(4)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (raw, bm25) = row.map_err(|e| to_storage_err(e.to_string()))?;
        results.push((raw.into_chunk()?, -bm25));
    }
    Ok(results)
}
