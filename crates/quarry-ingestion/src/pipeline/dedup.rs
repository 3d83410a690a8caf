//! Stage 2: decide whether an already indexed source needs work.

use quarry_core::models::{DocumentRecord, IngestOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupDecision {
    /// New source, or an indexed one to be replaced.
    Ingest,
    Skip {
        reason: &'static str,
        chunk_count: usize,
    },
}

pub fn decide(
    existing: Option<&DocumentRecord>,
    content_hash: &str,
    options: &IngestOptions,
) -> DedupDecision {
    let Some(record) = existing else {
        return DedupDecision::Ingest;
    };
    if options.skip_existing {
        return DedupDecision::Skip {
            reason: "source already indexed",
            chunk_count: record.chunk_count,
        };
    }
    if options.skip_unchanged && record.content_hash == content_hash {
        return DedupDecision::Skip {
            reason: "content unchanged",
            chunk_count: record.chunk_count,
        };
    }
    DedupDecision::Ingest
}
