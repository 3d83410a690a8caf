//! Scriptable embedding backend.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use quarry_core::errors::{EmbeddingError, QuarryResult};
use quarry_core::models::BackendReply;
use quarry_core::traits::IEmbeddingProvider;

/// Deterministic vector for `text`: distinct texts get distinct vectors and
/// tests can recompute the expected value.
pub fn mock_vector(text: &str, dims: usize) -> Vec<f32> {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in text.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    (0..dims)
        .map(|i| {
            let mixed = h.rotate_left((i % 64) as u32) ^ (i as u64).wrapping_mul(0x9e3779b97f4a7c15);
            ((mixed % 1000) as f32 / 1000.0) + 0.001
        })
        .collect()
}

/// Embedding backend whose failures are scripted per test.
///
/// Records every request so tests can assert on batching and concurrency.
pub struct MockProvider {
    dims: usize,
    delay: Duration,
    fail_batches_over: Option<usize>,
    malformed_batches_over: Option<usize>,
    poison: HashSet<String>,
    flaky_calls: AtomicUsize,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<Vec<String>>>,
}

impl MockProvider {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            delay: Duration::ZERO,
            fail_batches_over: None,
            malformed_batches_over: None,
            poison: HashSet::new(),
            flaky_calls: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep this long inside every request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Requests with more than `n` texts fail with HTTP 503.
    pub fn failing_batches_over(mut self, n: usize) -> Self {
        self.fail_batches_over = Some(n);
        self
    }

    /// Requests with more than `n` texts get one vector too few.
    pub fn malformed_batches_over(mut self, n: usize) -> Self {
        self.malformed_batches_over = Some(n);
        self
    }

    /// Any request containing `text` fails.
    pub fn poisoned_on(mut self, text: &str) -> Self {
        self.poison.insert(text.to_string());
        self
    }

    /// The first `n` requests fail with a transport error.
    pub fn flaky(self, n: usize) -> Self {
        self.flaky_calls.store(n, Ordering::SeqCst);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of requests observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Every request received, in arrival order.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn respond(&self, texts: &[String]) -> QuarryResult<BackendReply> {
        let remaining_flaky = self.flaky_calls.load(Ordering::SeqCst);
        if remaining_flaky > 0 {
            self.flaky_calls.store(remaining_flaky - 1, Ordering::SeqCst);
            return Err(EmbeddingError::Transport {
                reason: "connection reset".into(),
            }
            .into());
        }
        if let Some(bad) = texts.iter().find(|t| self.poison.contains(t.as_str())) {
            return Err(EmbeddingError::Http {
                status: 500,
                body: format!("cannot embed {bad:?}"),
            }
            .into());
        }
        if self.fail_batches_over.is_some_and(|n| texts.len() > n) {
            return Err(EmbeddingError::Http {
                status: 503,
                body: "batch too large".into(),
            }
            .into());
        }

        let mut vectors: Vec<Vec<f32>> = texts.iter().map(|t| mock_vector(t, self.dims)).collect();
        if self.malformed_batches_over.is_some_and(|n| texts.len() > n) {
            vectors.pop();
        }
        Ok(BackendReply::Embeddings(vectors))
    }
}

#[async_trait]
impl IEmbeddingProvider for MockProvider {
    async fn embed_batch(&self, texts: &[String]) -> QuarryResult<BackendReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(texts.to_vec());
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let reply = self.respond(texts);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        reply
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn is_available(&self) -> bool {
        true
    }
}
