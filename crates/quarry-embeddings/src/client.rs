//! EmbeddingClient: the entry point for turning text into vectors.
//!
//! Texts are grouped into batches of `batch_size` and dispatched in waves of
//! at most `concurrency` batches; a wave completes before the next starts.
//! Every backend call goes through [`ResilientCall`]. A batch that still
//! fails is re-sent one text at a time, and only an item that fails on its
//! own makes the whole call fail.

use std::sync::Arc;

use futures::future::join_all;
use quarry_core::config::EmbeddingConfig;
use quarry_core::errors::{EmbeddingError, QuarryError, QuarryResult};
use quarry_core::models::BackendReply;
use quarry_core::traits::IEmbeddingProvider;
use quarry_observability::{embedding_span, events};
use tracing::{debug, info, Instrument};

use crate::cache::QueryCache;
use crate::resilience::{ResilientCall, RetryPolicy};

pub struct EmbeddingClient {
    provider: Arc<dyn IEmbeddingProvider>,
    resilient: ResilientCall,
    batch_size: usize,
    concurrency: usize,
    dimensions: usize,
    query_cache: QueryCache,
}

impl EmbeddingClient {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        info!(
            provider = provider.name(),
            model = %config.model,
            dims = config.dimensions,
            batch_size = config.batch_size,
            concurrency = config.concurrency,
            "EmbeddingClient initialized"
        );
        Self {
            provider,
            resilient: ResilientCall::new(RetryPolicy::from_config(config)),
            batch_size: config.batch_size.max(1),
            concurrency: config.concurrency.max(1),
            dimensions: config.dimensions,
            query_cache: QueryCache::new(config.query_cache_size),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Embed one text.
    pub async fn embed(&self, text: &str) -> QuarryResult<Vec<f32>> {
        let texts = [text.to_string()];
        let mut vectors = self.call_backend(&texts).await?;
        vectors.pop().ok_or_else(|| {
            EmbeddingError::Malformed {
                reason: "empty reply for single input".into(),
            }
            .into()
        })
    }

    /// Embed a query, serving repeats from the query cache.
    pub async fn embed_query(&self, query: &str) -> QuarryResult<Vec<f32>> {
        if let Some(cached) = self.query_cache.get(query) {
            debug!("query embedding cache hit");
            return Ok(cached);
        }
        let vector = self.embed(query).await?;
        self.query_cache.insert(query, vector.clone());
        Ok(vector)
    }

    /// Embed `texts` with the configured wave size.
    pub async fn embed_documents(&self, texts: &[String]) -> QuarryResult<Vec<Vec<f32>>> {
        self.embed_batch(texts, self.concurrency).await
    }

    /// Embed `texts`, dispatching at most `concurrency` batches at once.
    ///
    /// On success the output has one vector per input, in input order.
    /// Fails with [`EmbeddingError::ItemFailed`] naming the first input that
    /// could not be embedded even on its own.
    pub async fn embed_batch(
        &self,
        texts: &[String],
        concurrency: usize,
    ) -> QuarryResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let concurrency = concurrency.max(1);
        let span = embedding_span!(self.provider.name(), texts.len());

        async {
            let groups: Vec<(usize, &[String])> = texts
                .chunks(self.batch_size)
                .enumerate()
                .map(|(i, group)| (i * self.batch_size, group))
                .collect();

            let mut out = Vec::with_capacity(texts.len());
            for wave in groups.chunks(concurrency) {
                let results =
                    join_all(wave.iter().map(|&(offset, group)| self.embed_group(offset, group)))
                        .await;
                for vectors in results {
                    out.extend(vectors?);
                }
            }
            debug!(count = out.len(), "batch embedding complete");
            Ok::<_, QuarryError>(out)
        }
        .instrument(span)
        .await
    }

    async fn embed_group(&self, offset: usize, group: &[String]) -> QuarryResult<Vec<Vec<f32>>> {
        let failure = match self.call_backend(group).await {
            Ok(vectors) => return Ok(vectors),
            Err(e) => e,
        };
        events::embedding_batch_degraded(offset, group.len(), &failure.to_string());

        let mut vectors = Vec::with_capacity(group.len());
        for (i, text) in group.iter().enumerate() {
            let single = std::slice::from_ref(text);
            match self.call_backend(single).await {
                Ok(mut v) => vectors.append(&mut v),
                Err(e) => {
                    return Err(EmbeddingError::ItemFailed {
                        index: offset + i,
                        reason: e.to_string(),
                    }
                    .into())
                }
            }
        }
        Ok(vectors)
    }

    /// One resilient backend request, validated against the input count and
    /// the configured dimensions inside the retried closure.
    async fn call_backend(&self, texts: &[String]) -> QuarryResult<Vec<Vec<f32>>> {
        let provider = &self.provider;
        let dimensions = self.dimensions;
        self.resilient
            .run("embed_batch", move || async move {
                match provider
                    .embed_batch(texts)
                    .await?
                    .validate(texts.len(), dimensions)
                {
                    BackendReply::Embeddings(vectors) => Ok(vectors),
                    BackendReply::Malformed { reason } => {
                        Err(EmbeddingError::Malformed { reason }.into())
                    }
                }
            })
            .await
    }
}
