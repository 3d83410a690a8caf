use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ChunkId, DegradationEvent};
use crate::errors::{QuarryError, RetrievalError};

/// Which signals a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Vector,
    Lexical,
    Hybrid,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Vector => "vector",
            Self::Lexical => "lexical",
            Self::Hybrid => "hybrid",
        };
        f.write_str(s)
    }
}

impl FromStr for SearchMode {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vector" => Ok(Self::Vector),
            "lexical" => Ok(Self::Lexical),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(RetrievalError::InvalidMode {
                mode: other.to_string(),
            }
            .into()),
        }
    }
}

/// Query-scoped unit passed between search, fusion, and reranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub chunk_id: ChunkId,
    pub content: String,
    pub source_filename: String,
    /// Signal strength normalized to roughly [0, 1], higher is better.
    pub signal_score: f64,
}

/// One row of the retrieval API output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub content: String,
    pub source_filename: String,
    pub relevance_score: f64,
}

/// Results plus any signal degradations that occurred while producing them.
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub degradations: Vec<DegradationEvent>,
}

impl SearchResponse {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}
