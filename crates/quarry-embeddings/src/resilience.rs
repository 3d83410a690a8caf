//! Timeout plus bounded retry with exponential backoff for network calls.

use std::future::Future;
use std::time::Duration;

use quarry_core::config::EmbeddingConfig;
use quarry_core::errors::{EmbeddingError, QuarryResult};
use tracing::debug;

/// How many times to try a call and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each retry.
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Hard timeout per attempt.
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            timeout: config.timeout(),
        }
    }

    /// Backoff before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&EmbeddingConfig::default())
    }
}

/// Runs a fallible async call under a [`RetryPolicy`].
///
/// Every failure counts as a failed attempt, including timeouts and replies
/// the caller rejects inside the closure. After the last attempt the error is
/// [`EmbeddingError::RetriesExhausted`] carrying the final failure.
#[derive(Debug, Clone, Copy)]
pub struct ResilientCall {
    policy: RetryPolicy,
}

impl ResilientCall {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> QuarryResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = QuarryResult<T>>,
    {
        let attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            if attempt > 1 {
                let delay = self.policy.delay_for(attempt - 1);
                debug!(
                    operation,
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after backoff"
                );
                tokio::time::sleep(delay).await;
            }

            match tokio::time::timeout(self.policy.timeout, call()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => {
                    debug!(operation, attempt, transient = e.is_transient(), error = %e, "attempt failed");
                    last_error = e.to_string();
                }
                Err(_) => {
                    let e = EmbeddingError::Timeout {
                        timeout_ms: self.policy.timeout.as_millis() as u64,
                    };
                    debug!(operation, attempt, error = %e, "attempt timed out");
                    last_error = e.to_string();
                }
            }
        }

        Err(EmbeddingError::RetriesExhausted {
            operation: operation.to_string(),
            attempts,
            last_error,
        }
        .into())
    }
}
