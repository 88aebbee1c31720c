#![allow(dead_code)]

use ctrlpanel_model::CollectionKey;
use ctrlpanel_storage::{
    GatewayConfig, MemoryBackend, PersistenceGateway, StorageError, StorageResult, WriteQueue,
};
use ctrlpanel_store::{EntityStore, NullSink, PersistenceSink, StoreCapabilities, StoreConfig};
use ctrlpanel_types::{ManualClock, SequentialIds, Timestamp};
use std::sync::{Arc, Mutex};

pub const START: u64 = 1_700_000_000_000;

/// Sink that remembers every write.
#[derive(Default)]
pub struct RecordingSink {
    pub writes: Mutex<Vec<(CollectionKey, String)>>,
}

impl RecordingSink {
    pub fn keys(&self) -> Vec<CollectionKey> {
        self.writes.lock().unwrap().iter().map(|(k, _)| *k).collect()
    }

    pub fn last_value(&self, key: CollectionKey) -> Option<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }
}

impl PersistenceSink for RecordingSink {
    fn save(&self, key: CollectionKey, value: String) -> StorageResult<()> {
        self.writes.lock().unwrap().push((key, value));
        Ok(())
    }
}

/// Sink that rejects every write.
pub struct FailingSink;

impl PersistenceSink for FailingSink {
    fn save(&self, _key: CollectionKey, _value: String) -> StorageResult<()> {
        Err(StorageError::QueueClosed)
    }
}

pub fn test_config() -> StoreConfig {
    StoreConfig {
        platform: "testos".into(),
        seed_default_features: false,
    }
}

pub fn caps_with(sink: Arc<dyn PersistenceSink>) -> (StoreCapabilities, ManualClock) {
    let clock = ManualClock::new(Timestamp::from_millis(START));
    let caps = StoreCapabilities {
        clock: Arc::new(clock.clone()),
        ids: Arc::new(SequentialIds::new("id")),
        sink,
    };
    (caps, clock)
}

pub fn make_store() -> (EntityStore, Arc<RecordingSink>, ManualClock) {
    let sink = Arc::new(RecordingSink::default());
    let (caps, clock) = caps_with(sink.clone());
    (EntityStore::new(test_config(), caps), sink, clock)
}

/// Store restored from `backend`, writing through a live queue into it.
///
/// Must run inside a tokio runtime.
pub fn queued_store(backend: &Arc<MemoryBackend>) -> (EntityStore, Arc<WriteQueue>) {
    let gateway = PersistenceGateway::new(backend.clone(), GatewayConfig::default());
    let queue = Arc::new(gateway.start_writer());
    let (caps, _) = caps_with(queue.clone());
    (EntityStore::restore(gateway.load(), test_config(), caps), queue)
}

/// Fresh store loaded from whatever `backend` holds now.
pub fn reload(backend: &Arc<MemoryBackend>) -> EntityStore {
    let gateway = PersistenceGateway::new(backend.clone(), GatewayConfig::default());
    let (caps, _) = caps_with(Arc::new(NullSink));
    EntityStore::restore(gateway.load(), test_config(), caps)
}
