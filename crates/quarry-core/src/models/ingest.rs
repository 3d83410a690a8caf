use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stage, carried in ingestion errors so callers know where it broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStage {
    Validate,
    Chunk,
    Embed,
    Store,
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validate => "validate",
            Self::Chunk => "chunk",
            Self::Embed => "embed",
            Self::Store => "store",
        };
        f.write_str(s)
    }
}

/// Per-call ingestion switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Skip any source filename that is already indexed.
    pub skip_existing: bool,
    /// Skip an indexed source whose stored content hash matches the new text.
    pub skip_unchanged: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            skip_existing: false,
            skip_unchanged: true,
        }
    }
}

/// Outcome of one `ingest` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub source_file: String,
    pub chunk_count: usize,
    pub success: bool,
    /// True when duplicate detection short-circuited the call.
    pub skipped: bool,
    pub error: Option<String>,
}

impl IngestReport {
    pub fn indexed(source_file: &str, chunk_count: usize) -> Self {
        Self {
            source_file: source_file.to_string(),
            chunk_count,
            success: true,
            skipped: false,
            error: None,
        }
    }

    pub fn skipped(source_file: &str, chunk_count: usize) -> Self {
        Self {
            skipped: true,
            ..Self::indexed(source_file, chunk_count)
        }
    }

    pub fn failed(source_file: &str, error: String) -> Self {
        Self {
            source_file: source_file.to_string(),
            chunk_count: 0,
            success: false,
            skipped: false,
            error: Some(error),
        }
    }
}
