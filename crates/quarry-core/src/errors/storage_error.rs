/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("transaction for {source_document} rolled back: {reason}")]
    TransactionFailed {
        source_document: String,
        reason: String,
    },

    #[error("embedding dimension mismatch: store holds {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("database corruption detected: {details}")]
    CorruptionDetected { details: String },
}
