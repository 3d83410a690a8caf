//! Brute-force cosine search over stored embeddings.

use std::cmp::Ordering;

use rusqlite::Connection;

use quarry_core::errors::{QuarryResult, StorageError};
use quarry_core::models::{Chunk, ChunkId};

use super::chunk_ops::get_chunk;
use crate::to_storage_err;

/// Nearest chunks to `query` as `(chunk, cosine_distance)`, ascending.
///
/// Distance is `1 - cosine_similarity`, in `[0, 2]`. A zero query vector has
/// no direction and matches nothing. Ties are broken by chunk id.
pub fn search_vector(
    conn: &Connection,
    query: &[f32],
    limit: usize,
) -> QuarryResult<Vec<(Chunk, f64)>> {
    let query_norm = norm(query);
    if query_norm == 0.0 || limit == 0 {
        return Ok(Vec::new());
    }

    let mut stmt = conn
        .prepare("SELECT chunk_id, embedding, dimensions FROM chunk_embeddings")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, ChunkId>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(ChunkId, f64)> = Vec::new();
    for row in rows {
        let (chunk_id, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query.len() {
            return Err(StorageError::DimensionMismatch {
                expected: dims as usize,
                actual: query.len(),
            }
            .into());
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize)?;
        let distance = 1.0 - dot(query, &stored) / (query_norm * norm(&stored)).max(f64::MIN_POSITIVE);
        scored.push((chunk_id, distance));
    }

    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
    scored.truncate(limit);

    let mut results = Vec::with_capacity(scored.len());
    for (chunk_id, distance) in scored {
        if let Some(chunk) = get_chunk(conn, chunk_id)? {
            results.push((chunk, distance));
        }
    }
    Ok(results)
}

/// Encode as little-endian f32 bytes.
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Decode little-endian f32 bytes, rejecting blobs that do not hold exactly
/// `expected_dims` floats.
pub fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> QuarryResult<Vec<f32>> {
    if bytes.len() != expected_dims * 4 {
        return Err(StorageError::CorruptionDetected {
            details: format!(
                "embedding blob has {} bytes, expected {} for {expected_dims} dimensions",
                bytes.len(),
                expected_dims * 4
            ),
        }
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum()
}

fn norm(v: &[f32]) -> f64 {
    v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt()
}
