//! HybridSearcher coordinating the vector and lexical signals with RRF.

pub mod lexical_search;
pub mod rrf_fusion;
pub mod vector_search;

use std::sync::Arc;

use quarry_core::config::RetrievalConfig;
use quarry_core::errors::{QuarryError, QuarryResult, RetrievalError};
use quarry_core::models::{DegradationEvent, RankedCandidate};
use quarry_core::traits::IChunkStore;
use quarry_embeddings::EmbeddingClient;
use quarry_observability::events;
use tracing::debug;

use crate::query::lexical_expression;

/// Fusion label of the vector signal.
pub const VECTOR_SIGNAL: &str = "vector";
/// Fusion label of the lexical signal.
pub const LEXICAL_SIGNAL: &str = "lexical";

/// Fused candidates plus the signals that had to be dropped to get them.
#[derive(Debug, Default)]
pub struct HybridOutcome {
    /// Best first, signal score normalized by the pool maximum.
    pub candidates: Vec<RankedCandidate>,
    pub degradations: Vec<DegradationEvent>,
}

/// Runs the vector and lexical signals against a shared store.
pub struct HybridSearcher {
    store: Arc<dyn IChunkStore>,
    embedder: Arc<EmbeddingClient>,
    config: RetrievalConfig,
}

impl HybridSearcher {
    pub fn new(
        store: Arc<dyn IChunkStore>,
        embedder: Arc<EmbeddingClient>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Vector candidates for `query`, best first.
    pub async fn vector_candidates(&self, query: &str) -> QuarryResult<Vec<RankedCandidate>> {
        let embedding = self.embedder.embed_query(query).await?;
        vector_search::search_vector(
            Arc::clone(&self.store),
            embedding,
            self.config.candidate_limit,
        )
        .await
    }

    /// Lexical candidates for `query`, best first. Empty when the query has
    /// no salient terms.
    pub async fn lexical_candidates(&self, query: &str) -> QuarryResult<Vec<RankedCandidate>> {
        let expression = lexical_expression(query);
        if expression.is_empty() {
            debug!("query has no salient terms, lexical signal skipped");
        }
        lexical_search::search_lexical(
            Arc::clone(&self.store),
            expression,
            self.config.candidate_limit,
        )
        .await
    }

    /// Run both signals concurrently and fuse them.
    ///
    /// One failing signal is recorded as a degradation and the other carries
    /// the query alone. Both failing is `AllSignalsFailed`.
    pub async fn search(&self, query: &str) -> QuarryResult<HybridOutcome> {
        let (vector, lexical) = tokio::join!(
            self.vector_candidates(query),
            self.lexical_candidates(query)
        );

        let mut degradations = Vec::new();
        let (vector, lexical) = match (vector, lexical) {
            (Ok(v), Ok(l)) => (v, l),
            (Ok(v), Err(e)) => {
                degradations.push(degrade(LEXICAL_SIGNAL, &e, VECTOR_SIGNAL));
                (v, Vec::new())
            }
            (Err(e), Ok(l)) => {
                degradations.push(degrade(VECTOR_SIGNAL, &e, LEXICAL_SIGNAL));
                (Vec::new(), l)
            }
            (Err(ve), Err(le)) => {
                return Err(RetrievalError::AllSignalsFailed {
                    failures: format!("{VECTOR_SIGNAL}: {ve}; {LEXICAL_SIGNAL}: {le}"),
                }
                .into());
            }
        };

        debug!(
            vector = vector.len(),
            lexical = lexical.len(),
            "fusing signal lists"
        );

        let fused = rrf_fusion::fuse(
            &[(VECTOR_SIGNAL, &vector[..]), (LEXICAL_SIGNAL, &lexical[..])],
            self.config.rrf_k,
            self.config.dual_signal_boost,
        );

        Ok(HybridOutcome {
            candidates: rrf_fusion::into_normalized_candidates(fused),
            degradations,
        })
    }
}

fn degrade(component: &str, error: &QuarryError, fallback: &str) -> DegradationEvent {
    let failure = error.to_string();
    events::degradation_triggered(component, &failure, fallback);
    DegradationEvent::now(component, failure, fallback)
}

/// Run blocking store work off the async executor.
pub(crate) async fn run_blocking<T, F>(task: F) -> QuarryResult<T>
where
    F: FnOnce() -> QuarryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| RetrievalError::TaskFailed {
            reason: e.to_string(),
        })?
}
