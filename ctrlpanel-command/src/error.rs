use ctrlpanel_store::StoreError;
use thiserror::Error;

/// Why a command failed. The display text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("No command entered")]
    Empty,

    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),

    /// Malformed arguments or missing required configuration.
    #[error("{0}")]
    Validation(String),

    /// Referenced feature does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            StoreError::Validation(msg) => Self::Validation(msg),
            StoreError::Handoff(e) => Self::Validation(e.to_string()),
        }
    }
}
