//! Span definitions per operation: retrieval, ingestion, embedding.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $mode:expr) => {
        tracing::info_span!("quarry.retrieval", query = %$query, mode = %$mode)
    };
}

/// Create an ingestion span.
#[macro_export]
macro_rules! ingestion_span {
    ($source:expr) => {
        tracing::info_span!("quarry.ingestion", source = %$source)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $count:expr) => {
        tracing::info_span!("quarry.embedding", provider = %$provider, count = $count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "quarry.retrieval";
    pub const INGESTION: &str = "quarry.ingestion";
    pub const EMBEDDING: &str = "quarry.embedding";
}
