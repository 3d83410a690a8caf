use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NewChunk;

/// One row per ingested source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub source: String,
    /// blake3 hex digest of the raw text that produced the chunks.
    pub content_hash: String,
    pub chunk_count: usize,
    pub ingested_at: DateTime<Utc>,
}

/// A full document's chunk set, written in a single transaction.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub source: String,
    pub content_hash: String,
    pub chunks: Vec<NewChunk>,
}
