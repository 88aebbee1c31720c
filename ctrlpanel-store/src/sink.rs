//! Write-through seam between the store and durable storage.

use ctrlpanel_model::CollectionKey;
use ctrlpanel_storage::{StorageResult, WriteQueue};

/// Receives the serialized value of a collection after each mutation.
///
/// Implementations must return promptly; the store calls this while
/// holding its mutation lock.
pub trait PersistenceSink: Send + Sync {
    fn save(&self, key: CollectionKey, value: String) -> StorageResult<()>;
}

impl PersistenceSink for WriteQueue {
    fn save(&self, key: CollectionKey, value: String) -> StorageResult<()> {
        self.enqueue(key, value)
    }
}

/// Discards every write. For hosts without durable storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PersistenceSink for NullSink {
    fn save(&self, _key: CollectionKey, _value: String) -> StorageResult<()> {
        Ok(())
    }
}
