//! Structured log events for key system operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// A document was chunked, embedded, and committed.
pub fn document_ingested(source: &str, chunk_count: usize, elapsed_ms: u64) {
    tracing::info!(
        event = "document_ingested",
        source = %source,
        chunk_count = chunk_count,
        elapsed_ms = elapsed_ms,
        "document ingested"
    );
}

/// A document was left untouched because it already exists.
pub fn document_skipped(source: &str, reason: &str) {
    tracing::info!(
        event = "document_skipped",
        source = %source,
        reason = %reason,
        "document skipped"
    );
}

/// A retrieval signal failed and the engine continued without it.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

pub fn search_completed(mode: &str, result_count: usize, degraded: bool, elapsed_ms: u64) {
    tracing::info!(
        event = "search_completed",
        mode = %mode,
        result_count = result_count,
        degraded = degraded,
        elapsed_ms = elapsed_ms,
        "search completed"
    );
}

/// A batch request failed after retries and is being retried item by item.
pub fn embedding_batch_degraded(offset: usize, batch_len: usize, failure: &str) {
    tracing::warn!(
        event = "embedding_batch_degraded",
        offset = offset,
        batch_len = batch_len,
        failure = %failure,
        "embedding batch failed, falling back to per-item calls"
    );
}
