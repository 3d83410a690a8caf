//! Ranking stage applied after the signals (and fusion) have produced a pool.

pub mod reranker;

pub use reranker::{RerankWeights, RerankedCandidate, Reranker};
