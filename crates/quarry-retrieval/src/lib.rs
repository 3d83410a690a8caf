//! # quarry-retrieval
//!
//! Query-time half of the engine.
//!
//! ```text
//! query
//! ├── query::terms        (lexical expression, salient terms)
//! ├── search::HybridSearcher
//! │   ├── vector_search   (embed_query → cosine scan)
//! │   ├── lexical_search  (FTS5 prefix disjunction)
//! │   └── rrf_fusion      (rank fusion + dual-signal boost)
//! └── ranking::Reranker   (term overlap + phrase bonus)
//! ```

pub mod engine;
pub mod query;
pub mod ranking;
pub mod search;

pub use engine::RetrievalEngine;
pub use ranking::reranker::{RerankWeights, Reranker};
pub use search::rrf_fusion::{FusedCandidate, DUAL_SIGNAL_BOOST};
pub use search::HybridSearcher;
