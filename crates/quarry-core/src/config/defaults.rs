// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "quarry.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "ollama";
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";
pub const DEFAULT_EMBEDDING_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 16;
pub const DEFAULT_EMBEDDING_CONCURRENCY: usize = 4;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 200;
pub const DEFAULT_MAX_DELAY_MS: u64 = 5_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_024;

// --- Chunking ---
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1_000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

// --- Retrieval ---
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_DUAL_SIGNAL_BOOST: f64 = 1.5;
pub const DEFAULT_CANDIDATE_LIMIT: usize = 30;
pub const DEFAULT_FINAL_TOP_K: usize = 10;
pub const DEFAULT_INTERMEDIATE_TOP_K: usize = 15;
pub const DEFAULT_MATCH_WEIGHT: f64 = 10.0;
pub const DEFAULT_SIGNAL_WEIGHT: f64 = 0.1;
pub const DEFAULT_PHRASE_BONUS: f64 = 1.0;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
