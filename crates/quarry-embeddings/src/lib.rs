//! # quarry-embeddings
//!
//! Turns text into fixed-dimension vectors through a pluggable backend.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingClient
//! ├── batching (groups of batch_size, waves of concurrency)
//! ├── ResilientCall (timeout + bounded retry with exponential backoff)
//! ├── per-item fallback for batches that fail after retries
//! ├── QueryCache (moka, keyed by blake3 of the query)
//! └── IEmbeddingProvider
//!     ├── OllamaProvider (HTTP, /api/embed)
//!     └── HashingProvider (always available)
//! ```

pub mod cache;
pub mod client;
pub mod providers;
pub mod resilience;

pub use cache::QueryCache;
pub use client::EmbeddingClient;
pub use providers::{create_provider, HashingProvider, OllamaProvider};
pub use resilience::{ResilientCall, RetryPolicy};
