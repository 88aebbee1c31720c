use thiserror::Error;

/// Handoff to the platform mail client.
///
/// The core only supplies the address and content; what the client does
/// with them is opaque.
pub trait EmailComposer {
    fn compose(&self, address: &str, subject: &str, body: &str) -> Result<(), ComposeError>;
}

/// The mail client could not take the message.
#[derive(Debug, Error)]
#[error("email handoff failed: {0}")]
pub struct ComposeError(pub String);
