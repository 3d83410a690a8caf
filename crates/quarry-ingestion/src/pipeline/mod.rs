//! Ingestion pipeline orchestrator.
//!
//! Stage 1: Validate → Stage 2: Dedup → Stage 3: Chunk → Stage 4: Embed →
//! Stage 5: Store

pub mod dedup;
pub mod store;
pub mod validate;

use std::sync::Arc;
use std::time::Instant;

use quarry_chunking::Chunker;
use quarry_core::config::ChunkingConfig;
use quarry_core::models::{IngestOptions, IngestReport, IngestStage, NewChunk, NewDocument};
use quarry_core::traits::IChunkStore;
use quarry_core::{QuarryError, QuarryResult};
use quarry_embeddings::EmbeddingClient;
use quarry_observability::{events, ingestion_span};
use tracing::{debug, info, warn, Instrument};

use dedup::DedupDecision;

/// Turns raw document text into committed chunks.
///
/// Documents are processed one at a time per call; the store serializes
/// writers, so concurrent calls are safe but do not commit in parallel.
pub struct IngestionPipeline {
    store: Arc<dyn IChunkStore>,
    embedder: Arc<EmbeddingClient>,
    chunker: Chunker,
}

impl IngestionPipeline {
    pub fn new(
        store: Arc<dyn IChunkStore>,
        embedder: Arc<EmbeddingClient>,
        chunking: &ChunkingConfig,
    ) -> QuarryResult<Self> {
        if embedder.dimensions() != store.dimensions() {
            return Err(QuarryError::ConfigError(format!(
                "embedding dimensions ({}) differ from store dimensions ({})",
                embedder.dimensions(),
                store.dimensions()
            )));
        }
        Ok(Self {
            store,
            embedder,
            chunker: Chunker::new(chunking)?,
        })
    }

    /// Ingest one document, folding any failure into the report.
    pub async fn ingest(
        &self,
        raw_text: &str,
        source_filename: &str,
        options: &IngestOptions,
    ) -> IngestReport {
        match self.try_ingest(raw_text, source_filename, options).await {
            Ok(report) => report,
            Err(e) => {
                warn!(source = %source_filename, error = %e, "ingestion failed");
                IngestReport::failed(source_filename, e.to_string())
            }
        }
    }

    /// Ingest one document. Errors carry the file and the stage that failed.
    pub async fn try_ingest(
        &self,
        raw_text: &str,
        source_filename: &str,
        options: &IngestOptions,
    ) -> QuarryResult<IngestReport> {
        let span = ingestion_span!(source_filename);
        self.run(raw_text, source_filename, options)
            .instrument(span)
            .await
    }

    /// Ingest `(source_filename, raw_text)` pairs in order.
    pub async fn ingest_all<'a, I>(&self, documents: I, options: &IngestOptions) -> Vec<IngestReport>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut reports = Vec::new();
        for (source, text) in documents {
            reports.push(self.ingest(text, source, options).await);
        }
        let indexed = reports.iter().filter(|r| r.success && !r.skipped).count();
        info!(documents = reports.len(), indexed, "batch ingestion complete");
        reports
    }

    /// Drop a source and all of its chunks. Returns the number of chunks removed.
    pub async fn remove(&self, source_filename: &str) -> QuarryResult<usize> {
        let removed = store::remove(Arc::clone(&self.store), source_filename).await?;
        info!(source = %source_filename, chunks = removed, "document removed");
        Ok(removed)
    }

    async fn run(
        &self,
        raw_text: &str,
        source: &str,
        options: &IngestOptions,
    ) -> QuarryResult<IngestReport> {
        let started = Instant::now();

        // Stage 1: Validate.
        validate::validate(raw_text, source).map_err(|e| e.at_stage(source, IngestStage::Validate))?;
        let content_hash = validate::content_hash(raw_text);

        // Stage 2: Dedup.
        let existing = store::lookup(Arc::clone(&self.store), source)
            .await
            .map_err(|e| e.at_stage(source, IngestStage::Store))?;
        if let DedupDecision::Skip {
            reason,
            chunk_count,
        } = dedup::decide(existing.as_ref(), &content_hash, options)
        {
            events::document_skipped(source, reason);
            return Ok(IngestReport::skipped(source, chunk_count));
        }
        if existing.is_some() {
            debug!("replacing previously indexed document");
        }

        // Stage 3: Chunk.
        let chunks = self.chunker.chunk(raw_text);
        if chunks.is_empty() {
            return Err(QuarryError::InputError {
                reason: "document produced no chunks".into(),
            }
            .at_stage(source, IngestStage::Chunk));
        }
        debug!(chunks = chunks.len(), "document chunked");

        // Stage 4: Embed.
        let embeddings = self
            .embedder
            .embed_documents(&chunks)
            .await
            .map_err(|e| e.at_stage(source, IngestStage::Embed))?;

        // Stage 5: Store.
        let document = NewDocument {
            source: source.to_string(),
            content_hash,
            chunks: chunks
                .into_iter()
                .zip(embeddings)
                .map(|(content, embedding)| NewChunk { content, embedding })
                .collect(),
        };
        let ids = store::commit(Arc::clone(&self.store), document)
            .await
            .map_err(|e| e.at_stage(source, IngestStage::Store))?;

        events::document_ingested(source, ids.len(), started.elapsed().as_millis() as u64);
        Ok(IngestReport::indexed(source, ids.len()))
    }
}
