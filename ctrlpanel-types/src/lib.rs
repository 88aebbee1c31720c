//! Core type definitions for the control panel.
//!
//! This crate defines the small, domain-agnostic types every other crate
//! builds on:
//! - Record identifiers ([`RecordId`]) and the [`IdGenerator`] capability
//! - Millisecond [`Timestamp`]s and the [`Clock`] capability
//!
//! Clocks and id generators are injected into the store rather than called
//! ambiently, so tests can swap in [`ManualClock`] and [`SequentialIds`].

mod ids;
mod timestamp;

pub use ids::{IdGenerator, RecordId, SequentialIds, UuidV7Ids};
pub use timestamp::{Clock, ManualClock, SystemClock, Timestamp};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid record id: {0}")]
    InvalidId(String),
}
