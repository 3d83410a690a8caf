//! RetrievalEngine: routes a query to the vector, lexical, or hybrid path.
//!
//! ```text
//! vector:  embed_query → vector scan → rerank → top N
//! lexical: term expression → FTS5 → rank/n pseudo-distance → rerank → top N
//! hybrid:  (vector ‖ lexical) → RRF → rerank → top N
//! ```
//!
//! The engine holds no per-query state; one instance serves concurrent queries.

use std::sync::Arc;
use std::time::Instant;

use quarry_core::config::RetrievalConfig;
use quarry_core::errors::QuarryResult;
use quarry_core::models::{RankedCandidate, SearchMode, SearchResponse, SearchResult};
use quarry_core::traits::IChunkStore;
use quarry_embeddings::EmbeddingClient;
use quarry_observability::{events, retrieval_span};
use tracing::{debug, info, Instrument};

use crate::ranking::{RerankWeights, RerankedCandidate, Reranker};
use crate::search::HybridSearcher;

pub struct RetrievalEngine {
    searcher: HybridSearcher,
    reranker: Reranker,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    pub fn new(
        store: Arc<dyn IChunkStore>,
        embedder: Arc<EmbeddingClient>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            searcher: HybridSearcher::new(store, embedder, config.clone()),
            reranker: Reranker::new(RerankWeights::from(&config)),
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Top `final_top_k` results for `query`.
    pub async fn search(&self, query: &str, mode: SearchMode) -> QuarryResult<Vec<SearchResult>> {
        Ok(self.search_detailed(query, mode).await?.results)
    }

    /// Like [`search`](Self::search), plus any signal degradations.
    pub async fn search_detailed(
        &self,
        query: &str,
        mode: SearchMode,
    ) -> QuarryResult<SearchResponse> {
        self.run(query, mode, self.config.final_top_k).await
    }

    /// The wider `intermediate_top_k` pool for callers that run a further
    /// selection stage.
    pub async fn search_pool(&self, query: &str, mode: SearchMode) -> QuarryResult<SearchResponse> {
        self.run(query, mode, self.config.intermediate_top_k).await
    }

    async fn run(&self, query: &str, mode: SearchMode, cap: usize) -> QuarryResult<SearchResponse> {
        let span = retrieval_span!(query, mode);
        self.execute(query, mode, cap).instrument(span).await
    }

    async fn execute(
        &self,
        query: &str,
        mode: SearchMode,
        cap: usize,
    ) -> QuarryResult<SearchResponse> {
        let started = Instant::now();

        if query.trim().is_empty() {
            debug!("empty query, nothing to search");
            return Ok(SearchResponse::default());
        }

        let (candidates, degradations) = match mode {
            SearchMode::Vector => (self.searcher.vector_candidates(query).await?, Vec::new()),
            SearchMode::Lexical => (self.searcher.lexical_candidates(query).await?, Vec::new()),
            SearchMode::Hybrid => {
                let outcome = self.searcher.search(query).await?;
                (outcome.candidates, outcome.degradations)
            }
        };

        if candidates.is_empty() {
            debug!("no candidates found");
        } else {
            info!(candidates = candidates.len(), "search returned candidates");
        }

        let ranked = self.rank(query, candidates, cap);
        let results: Vec<SearchResult> = ranked.into_iter().map(into_result).collect();

        events::search_completed(
            &mode.to_string(),
            results.len(),
            !degradations.is_empty(),
            started.elapsed().as_millis() as u64,
        );

        Ok(SearchResponse {
            results,
            degradations,
        })
    }

    fn rank(
        &self,
        query: &str,
        candidates: Vec<RankedCandidate>,
        cap: usize,
    ) -> Vec<RerankedCandidate> {
        let ranked = self.reranker.rerank(query, candidates, cap);
        debug!(ranked = ranked.len(), "rerank complete");
        ranked
    }
}

fn into_result(ranked: RerankedCandidate) -> SearchResult {
    SearchResult {
        content: ranked.candidate.content,
        source_filename: ranked.candidate.source_filename,
        relevance_score: ranked.score,
    }
}
