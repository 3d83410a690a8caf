use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// Multiplier applied to the fused score of a chunk found by more than one signal.
    pub dual_signal_boost: f64,
    /// Candidates fetched from each signal.
    pub candidate_limit: usize,
    /// Results returned to the caller.
    pub final_top_k: usize,
    /// Results kept for pools that feed a further stage.
    pub intermediate_top_k: usize,
    /// Reranker weight on the query-term match ratio.
    pub match_weight: f64,
    /// Reranker weight on the normalized signal score.
    pub signal_weight: f64,
    /// Reranker bonus when the full query appears verbatim.
    pub phrase_bonus: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            dual_signal_boost: defaults::DEFAULT_DUAL_SIGNAL_BOOST,
            candidate_limit: defaults::DEFAULT_CANDIDATE_LIMIT,
            final_top_k: defaults::DEFAULT_FINAL_TOP_K,
            intermediate_top_k: defaults::DEFAULT_INTERMEDIATE_TOP_K,
            match_weight: defaults::DEFAULT_MATCH_WEIGHT,
            signal_weight: defaults::DEFAULT_SIGNAL_WEIGHT,
            phrase_bonus: defaults::DEFAULT_PHRASE_BONUS,
        }
    }
}
