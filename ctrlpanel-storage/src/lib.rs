//! Persistence gateway for the control panel.
//!
//! Mirrors the entity store into a durable key-value medium.
//!
//! # Architecture
//!
//! - Six independently keyed records (see [`CollectionKey`](ctrlpanel_model::CollectionKey)),
//!   each a JSON document
//! - [`PersistenceGateway::load`] reads every key on its own; a missing or
//!   corrupt key falls back to that record's default instead of failing the load
//! - Writes go through a [`WriteQueue`]: a single worker drains an ordered
//!   channel, each write bounded by a timeout and guarded by a per-key
//!   sequence number so an abandoned write can't overwrite a newer one
//! - Backends implement [`KeyValueBackend`]; SQLite for devices, memory for tests

mod backend;
mod codec;
mod error;
mod gateway;
mod queue;

pub use backend::{KeyValueBackend, MemoryBackend, SqliteBackend};
pub use codec::{decode, encode};
pub use error::{StorageError, StorageResult};
pub use gateway::{GatewayConfig, LoadedState, PersistenceGateway};
pub use queue::WriteQueue;

use std::sync::{LockResult, MutexGuard, PoisonError};

/// Recovers a poisoned guard. Every critical section here leaves its data
/// consistent, so the poison flag carries no information.
pub(crate) fn relock<'a, T>(guard: LockResult<MutexGuard<'a, T>>) -> MutexGuard<'a, T> {
    guard.unwrap_or_else(PoisonError::into_inner)
}
