use std::sync::Arc;

use crate::errors::QuarryResult;
use crate::models::{Chunk, ChunkId, DocumentRecord, NewDocument};

/// The dual index store: chunk rows, a lexical index, and a vector index,
/// all addressed by `ChunkId`.
pub trait IChunkStore: Send + Sync {
    // --- Ingestion ---
    /// Insert a document's full chunk set in one transaction. Replaces any
    /// chunks previously stored for the same source.
    fn insert_document(&self, document: &NewDocument) -> QuarryResult<Vec<ChunkId>>;
    fn delete_document(&self, source: &str) -> QuarryResult<usize>;

    // --- Documents ---
    fn document_exists(&self, source: &str) -> QuarryResult<bool>;
    fn get_document(&self, source: &str) -> QuarryResult<Option<DocumentRecord>>;
    fn chunks_for_document(&self, source: &str) -> QuarryResult<Vec<Chunk>>;

    // --- Search ---
    /// Best-first by lexical relevance. The score is the raw relevance (higher is better).
    fn lexical_search(&self, expression: &str, limit: usize) -> QuarryResult<Vec<(Chunk, f64)>>;
    /// Ascending by cosine distance.
    fn vector_search(&self, query: &[f32], limit: usize) -> QuarryResult<Vec<(Chunk, f64)>>;

    // --- Aggregation ---
    fn chunk_count(&self) -> QuarryResult<usize>;
    fn document_count(&self) -> QuarryResult<usize>;
    /// Embedding dimension every stored vector must have.
    fn dimensions(&self) -> usize;
}

/// Blanket impl: `Arc<T>` implements `IChunkStore` by delegating to the inner `T`.
impl<T: IChunkStore> IChunkStore for Arc<T> {
    fn insert_document(&self, document: &NewDocument) -> QuarryResult<Vec<ChunkId>> { (**self).insert_document(document) }
    fn delete_document(&self, source: &str) -> QuarryResult<usize> { (**self).delete_document(source) }
    fn document_exists(&self, source: &str) -> QuarryResult<bool> { (**self).document_exists(source) }
    fn get_document(&self, source: &str) -> QuarryResult<Option<DocumentRecord>> { (**self).get_document(source) }
    fn chunks_for_document(&self, source: &str) -> QuarryResult<Vec<Chunk>> { (**self).chunks_for_document(source) }
    fn lexical_search(&self, expression: &str, limit: usize) -> QuarryResult<Vec<(Chunk, f64)>> { (**self).lexical_search(expression, limit) }
    fn vector_search(&self, query: &[f32], limit: usize) -> QuarryResult<Vec<(Chunk, f64)>> { (**self).vector_search(query, limit) }
    fn chunk_count(&self) -> QuarryResult<usize> { (**self).chunk_count() }
    fn document_count(&self) -> QuarryResult<usize> { (**self).document_count() }
    fn dimensions(&self) -> usize { (**self).dimensions() }
}
