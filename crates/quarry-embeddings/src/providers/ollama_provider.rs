//! Ollama embedding provider.
//!
//! `POST {base_url}/api/embed` with `{model, input}` answering `{embeddings}`.
//! Availability is tracked from the last health check or call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quarry_core::config::EmbeddingConfig;
use quarry_core::errors::{EmbeddingError, QuarryResult};
use quarry_core::models::BackendReply;
use quarry_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    /// `base_url` defaults to `http://localhost:11434` if `None`.
    pub fn new(model: String, dimensions: usize, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| "http://localhost:11434".to_string());
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimensions,
            available: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(
            config.model.clone(),
            config.dimensions,
            Some(config.base_url.clone()),
        )
    }

    /// Backend model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check if the Ollama server is reachable.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let result = self
            .client
            .get(&url)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await;

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }
}

#[async_trait]
impl IEmbeddingProvider for OllamaProvider {
    async fn embed_batch(&self, texts: &[String]) -> QuarryResult<BackendReply> {
        let url = format!("{}/api/embed", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                self.available.store(false, Ordering::Relaxed);
                return Err(EmbeddingError::Transport {
                    reason: format!("Ollama request failed: {e}"),
                }
                .into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Http {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        self.available.store(true, Ordering::Relaxed);
        match response.json::<OllamaEmbedResponse>().await {
            Ok(resp) => Ok(BackendReply::Embeddings(resp.embeddings)),
            Err(e) => Ok(BackendReply::Malformed {
                reason: format!("Ollama JSON parse error: {e}"),
            }),
        }
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
