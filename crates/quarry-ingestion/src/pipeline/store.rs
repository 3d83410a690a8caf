//! Stage 5: hand the finished document to the store off the async executor.

use std::sync::Arc;

use quarry_core::errors::{QuarryResult, StorageError};
use quarry_core::models::{ChunkId, DocumentRecord, NewDocument};
use quarry_core::traits::IChunkStore;

pub async fn commit(store: Arc<dyn IChunkStore>, document: NewDocument) -> QuarryResult<Vec<ChunkId>> {
    let source = document.source.clone();
    run_blocking(&source, move || store.insert_document(&document)).await
}

pub async fn lookup(store: Arc<dyn IChunkStore>, source: &str) -> QuarryResult<Option<DocumentRecord>> {
    let key = source.to_string();
    run_blocking(source, move || store.get_document(&key)).await
}

pub async fn remove(store: Arc<dyn IChunkStore>, source: &str) -> QuarryResult<usize> {
    let key = source.to_string();
    run_blocking(source, move || store.delete_document(&key)).await
}

async fn run_blocking<T, F>(source: &str, task: F) -> QuarryResult<T>
where
    F: FnOnce() -> QuarryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| StorageError::TransactionFailed {
            source_document: source.to_string(),
            reason: format!("store task aborted: {e}"),
        })?
}
