use serde::{Deserialize, Serialize};

use super::defaults;

/// Chunking configuration. Sizes are measured in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub max_chunk_size: usize,
    /// Overlap between consecutive slices when fixed-stride slicing kicks in.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: defaults::DEFAULT_MAX_CHUNK_SIZE,
            chunk_overlap: defaults::DEFAULT_CHUNK_OVERLAP,
        }
    }
}
