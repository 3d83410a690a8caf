mod chunk;
mod degradation_event;
mod document;
mod embedding_reply;
mod ingest;
mod search;

pub use chunk::{Chunk, ChunkId, NewChunk};
pub use degradation_event::DegradationEvent;
pub use document::{DocumentRecord, NewDocument};
pub use embedding_reply::BackendReply;
pub use ingest::{IngestOptions, IngestReport, IngestStage};
pub use search::{RankedCandidate, SearchMode, SearchResponse, SearchResult};
