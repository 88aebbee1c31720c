//! Thread-safe handle around the entity store.

use crate::store::EntityStore;
use ctrlpanel_model::Snapshot;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle that serializes every store operation behind one lock.
///
/// Cap enforcement and id assignment assume a single writer; every caller
/// in a multi-threaded host (interpreter, capture adapters, FFI) goes
/// through this handle.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<EntityStore>>,
}

impl SharedStore {
    pub fn new(store: EntityStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store for a sequence of operations.
    ///
    /// A panic inside a previous critical section cannot leave a collection
    /// half-updated (every mutation commits with a single assignment or
    /// push), so a poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, EntityStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut EntityStore) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }
}
