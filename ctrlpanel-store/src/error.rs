//! Error types for store operations.

use crate::email::ComposeError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a store mutation can report. A failed mutation leaves the store
/// unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Required input missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// Referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The platform mail client rejected the handoff.
    #[error(transparent)]
    Handoff(#[from] ComposeError),
}
