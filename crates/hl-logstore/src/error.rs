//! Log store error types.

use thiserror::Error;

/// Errors from the interaction log store.
#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("no log entry with id {0}")]
    NotFound(i64),
}

/// Convenience alias for log store results.
pub type LogStoreResult<T> = Result<T, LogStoreError>;
