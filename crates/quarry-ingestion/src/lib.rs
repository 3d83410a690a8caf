//! # quarry-ingestion
//!
//! Raw text in, searchable chunks out. Each document passes through
//! validate → dedup → chunk → embed → store, and the store step is a single
//! transaction: a document is either fully visible to both indexes or absent.

pub mod pipeline;

pub use pipeline::IngestionPipeline;
