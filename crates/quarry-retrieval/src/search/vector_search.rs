//! Vector signal: cosine-distance scan over stored embeddings.

use std::sync::Arc;

use quarry_core::errors::QuarryResult;
use quarry_core::models::RankedCandidate;
use quarry_core::traits::IChunkStore;

use super::run_blocking;

/// Search by embedding similarity, best first.
///
/// The signal score is `1 - distance` clamped to [0, 1].
pub async fn search_vector(
    store: Arc<dyn IChunkStore>,
    embedding: Vec<f32>,
    limit: usize,
) -> QuarryResult<Vec<RankedCandidate>> {
    let hits = run_blocking(move || store.vector_search(&embedding, limit)).await?;

    Ok(hits
        .into_iter()
        .map(|(chunk, distance)| RankedCandidate {
            chunk_id: chunk.id,
            content: chunk.content,
            source_filename: chunk.source_document,
            signal_score: similarity(distance),
        })
        .collect())
}

/// Cosine distance in [0, 2] to a similarity in [0, 1].
pub fn similarity(distance: f64) -> f64 {
    (1.0 - distance).clamp(0.0, 1.0)
}
