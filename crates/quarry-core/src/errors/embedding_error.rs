/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {reason}")]
    Transport { reason: String },

    #[error("malformed backend response: {reason}")]
    Malformed { reason: String },

    #[error("{operation} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        last_error: String,
    },

    #[error("embedding input #{index} failed: {reason}")]
    ItemFailed { index: usize, reason: String },
}

impl EmbeddingError {
    /// Transient failures are worth another attempt with backoff.
    /// Client-side HTTP errors other than 429 are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } | Self::Malformed { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::RetriesExhausted { .. } | Self::ItemFailed { .. } => false,
        }
    }
}
