use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned chunk identity shared by the chunk row, its lexical entry,
/// and its embedding.
pub type ChunkId = i64;

/// A persisted chunk. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub content: String,
    pub source_document: String,
    pub created_at: DateTime<Utc>,
}

/// A chunk awaiting insertion, paired with its embedding.
#[derive(Debug, Clone)]
pub struct NewChunk {
    pub content: String,
    pub embedding: Vec<f32>,
}
