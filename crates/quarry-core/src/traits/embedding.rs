use async_trait::async_trait;

use crate::errors::QuarryResult;
use crate::models::BackendReply;

/// Embedding backend. One instance is built at startup and shared by `Arc`.
#[async_trait]
pub trait IEmbeddingProvider: Send + Sync {
    /// Send one request embedding every text in `texts`.
    ///
    /// `Err` means the call itself failed. `Ok(BackendReply::Malformed)` means
    /// the backend answered with something unusable.
    async fn embed_batch(&self, texts: &[String]) -> QuarryResult<BackendReply>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> QuarryResult<BackendReply> {
        self.embed_batch(&[text.to_string()]).await
    }

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
