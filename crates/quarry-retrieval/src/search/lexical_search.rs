//! Lexical signal: FTS5 match over chunk content.

use std::sync::Arc;

use quarry_core::errors::QuarryResult;
use quarry_core::models::RankedCandidate;
use quarry_core::traits::IChunkStore;

use super::run_blocking;

/// Run an FTS5 term expression, best first.
///
/// Raw bm25 scores are not comparable across queries, so the store rank is
/// mapped to a pseudo-distance `rank / n` and the signal score is one minus
/// that. An empty expression matches nothing and never reaches the store.
pub async fn search_lexical(
    store: Arc<dyn IChunkStore>,
    expression: String,
    limit: usize,
) -> QuarryResult<Vec<RankedCandidate>> {
    if expression.is_empty() {
        return Ok(Vec::new());
    }

    let hits = run_blocking(move || store.lexical_search(&expression, limit)).await?;
    let n = hits.len();

    Ok(hits
        .into_iter()
        .enumerate()
        .map(|(rank, (chunk, _bm25))| RankedCandidate {
            chunk_id: chunk.id,
            content: chunk.content,
            source_filename: chunk.source_document,
            signal_score: 1.0 - pseudo_distance(rank, n),
        })
        .collect())
}

/// Position in a list of `n` results mapped onto [0, 1).
pub fn pseudo_distance(rank: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    rank as f64 / n as f64
}
