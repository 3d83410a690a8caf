use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "ollama" or "hashing".
    pub provider: String,
    /// Backend model name sent with every request.
    pub model: String,
    /// Backend base URL.
    pub base_url: String,
    /// Embedding dimensions. The store rejects vectors of any other size.
    pub dimensions: usize,
    /// Texts per backend request.
    pub batch_size: usize,
    /// Batches dispatched per wave.
    pub concurrency: usize,
    /// Attempts per network call, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay_ms: u64,
    /// Upper bound on a single backoff delay.
    pub max_delay_ms: u64,
    /// Hard timeout per network call.
    pub timeout_ms: u64,
    /// Max entries in the query embedding cache.
    pub query_cache_size: u64,
}

impl EmbeddingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: defaults::DEFAULT_EMBEDDING_BASE_URL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            concurrency: defaults::DEFAULT_EMBEDDING_CONCURRENCY,
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: defaults::DEFAULT_BASE_DELAY_MS,
            max_delay_ms: defaults::DEFAULT_MAX_DELAY_MS,
            timeout_ms: defaults::DEFAULT_TIMEOUT_MS,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}
