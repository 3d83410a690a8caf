//! Provider registry.
//!
//! 1. Ollama (local HTTP backend, default)
//! 2. Hashing (always available, lowest quality)

pub mod hashing_provider;
pub mod ollama_provider;

pub use hashing_provider::HashingProvider;
pub use ollama_provider::OllamaProvider;

use std::sync::Arc;

use quarry_core::config::EmbeddingConfig;
use quarry_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Build the configured provider, health-checking network backends.
///
/// An unreachable Ollama or an unknown provider name falls back to
/// [`HashingProvider`] with a warning.
pub async fn create_provider(config: &EmbeddingConfig) -> Arc<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "ollama" => {
            let provider = OllamaProvider::from_config(config);
            if provider.health_check().await {
                info!(provider = "ollama", model = %config.model, "embedding provider connected");
                Arc::new(provider)
            } else {
                warn!(base_url = %config.base_url, "Ollama unavailable, falling back to hashing provider");
                Arc::new(HashingProvider::new(config.dimensions))
            }
        }
        "hashing" => {
            info!(provider = "hashing", "using hashing embedding provider");
            Arc::new(HashingProvider::new(config.dimensions))
        }
        other => {
            warn!(provider = %other, "unknown embedding provider, using hashing fallback");
            Arc::new(HashingProvider::new(config.dimensions))
        }
    }
}
