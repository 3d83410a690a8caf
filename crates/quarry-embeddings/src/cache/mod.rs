//! In-memory caching of query embeddings.

pub mod query_cache;

pub use query_cache::QueryCache;
