//! Shared fakes and fixture data for Quarry tests.

pub mod corpus;
pub mod providers;

pub use corpus::{sample_corpus, CorpusDocument};
pub use providers::{mock_vector, MockProvider};
