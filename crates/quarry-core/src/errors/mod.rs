mod embedding_error;
mod retrieval_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

use crate::models::IngestStage;

/// Result alias used across the workspace.
pub type QuarryResult<T> = Result<T, QuarryError>;

/// Top-level error for every Quarry subsystem.
#[derive(Debug, thiserror::Error)]
pub enum QuarryError {
    /// Empty or unextractable source text. Never retried.
    #[error("invalid input: {reason}")]
    InputError { reason: String },

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    /// A failure inside the ingestion pipeline, tagged with file and stage.
    #[error("ingestion of {source_file} failed at {stage} stage: {cause}")]
    Ingestion {
        source_file: String,
        stage: IngestStage,
        #[source]
        cause: Box<QuarryError>,
    },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("toml parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl QuarryError {
    /// Wrap this error with the ingestion file and stage it happened in.
    pub fn at_stage(self, source_file: &str, stage: IngestStage) -> Self {
        Self::Ingestion {
            source_file: source_file.to_string(),
            stage,
            cause: Box::new(self),
        }
    }

    /// Whether retrying the same call could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::EmbeddingError(e) => e.is_transient(),
            Self::Ingestion { cause, .. } => cause.is_transient(),
            _ => false,
        }
    }
}
