//! Error types for the persistence layer.

use ctrlpanel_model::CollectionKey;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while reading or writing durable state.
///
/// None of these ever reach the command caller: the store logs them and
/// keeps its in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value could not be decoded into its entity shape.
    #[error("corrupt value for key {key}: {reason}")]
    Corrupt { key: CollectionKey, reason: String },

    /// A write did not finish within the configured timeout.
    #[error("write for key {0} timed out")]
    Timeout(CollectionKey),

    /// The write queue is at capacity.
    #[error("write queue full, dropping write for key {0}")]
    QueueFull(CollectionKey),

    /// The write queue worker has stopped.
    #[error("write queue closed")]
    QueueClosed,

    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}
