//! Query text processing shared by the lexical signal and the reranker.

pub mod terms;

pub use terms::{lexical_expression, normalize, salient_terms};
