/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("every retrieval signal failed: {failures}")]
    AllSignalsFailed { failures: String },

    #[error("unknown search mode: {mode}")]
    InvalidMode { mode: String },

    #[error("search task aborted: {reason}")]
    TaskFailed { reason: String },
}
