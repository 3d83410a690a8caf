pub mod chunking_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use chunking_config::ChunkingConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use crate::errors::{QuarryError, QuarryResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarryConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl QuarryConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(toml_str: &str) -> QuarryResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> QuarryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuarryError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> QuarryResult<()> {
        let c = &self.chunking;
        if c.max_chunk_size == 0 {
            return Err(QuarryError::ConfigError(
                "chunking.max_chunk_size must be positive".into(),
            ));
        }
        if c.chunk_overlap >= c.max_chunk_size {
            return Err(QuarryError::ConfigError(format!(
                "chunking.chunk_overlap ({}) must be smaller than max_chunk_size ({})",
                c.chunk_overlap, c.max_chunk_size
            )));
        }

        let e = &self.embedding;
        if e.dimensions == 0 || e.batch_size == 0 || e.concurrency == 0 || e.max_attempts == 0 {
            return Err(QuarryError::ConfigError(
                "embedding dimensions, batch_size, concurrency and max_attempts must be positive"
                    .into(),
            ));
        }

        let r = &self.retrieval;
        if r.candidate_limit == 0 || r.final_top_k == 0 || r.intermediate_top_k == 0 {
            return Err(QuarryError::ConfigError(
                "retrieval limits must be positive".into(),
            ));
        }
        if r.dual_signal_boost < 1.0 {
            return Err(QuarryError::ConfigError(format!(
                "retrieval.dual_signal_boost ({}) must be at least 1.0",
                r.dual_signal_boost
            )));
        }
        // The weakest chunk found by both signals, last in both lists, scores
        // boost * 2/(k + n) and must beat the strongest single-signal chunk
        // at 1/(k + 1). Cross-multiplied to keep the comparison exact.
        let k = f64::from(r.rrf_k);
        let n = r.candidate_limit as f64;
        if 2.0 * r.dual_signal_boost * (k + 1.0) <= k + n {
            return Err(QuarryError::ConfigError(format!(
                "retrieval.dual_signal_boost ({}) is too small for rrf_k = {} and \
                 candidate_limit = {}: it must exceed {:.4}",
                r.dual_signal_boost,
                r.rrf_k,
                r.candidate_limit,
                min_dual_signal_boost(r.rrf_k, r.candidate_limit)
            )));
        }
        Ok(())
    }
}

/// Lower bound (exclusive) on the dual-signal boost for lists of
/// `candidate_limit` entries fused with `rrf_k`.
pub fn min_dual_signal_boost(rrf_k: u32, candidate_limit: usize) -> f64 {
    let k = f64::from(rrf_k);
    (k + candidate_limit as f64) / (2.0 * (k + 1.0))
}
