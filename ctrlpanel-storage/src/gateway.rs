//! Startup load and writer construction.

use crate::backend::KeyValueBackend;
use crate::codec::decode;
use crate::queue::WriteQueue;
use ctrlpanel_model::{
    CollectionKey, CommandLogEntry, EmailQueueItem, Feature, GpsLogEntry, PhotoLogEntry,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Configuration for the persistence gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// A write still running after this long is abandoned and logged.
    pub write_timeout_ms: u64,
    /// Maximum number of writes waiting in the queue.
    pub queue_capacity: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            write_timeout_ms: 5_000,
            queue_capacity: 256,
        }
    }
}

impl GatewayConfig {
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

/// Everything read from durable storage at startup.
///
/// Every field already holds its default when the key was missing or could
/// not be decoded. `features` stays `None` only when the key was never
/// written, which is how the store recognises a first run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedState {
    pub features: Option<Vec<Feature>>,
    pub gps_logs: Vec<GpsLogEntry>,
    pub photo_logs: Vec<PhotoLogEntry>,
    pub command_logs: Vec<CommandLogEntry>,
    pub email_queue: Vec<EmailQueueItem>,
    pub email_address: String,
}

enum KeyRead<T> {
    Missing,
    Corrupt,
    Value(T),
}

impl<T: Default> KeyRead<T> {
    fn or_default(self) -> T {
        match self {
            Self::Value(v) => v,
            Self::Missing | Self::Corrupt => T::default(),
        }
    }
}

/// Durable mirror of the entity store.
pub struct PersistenceGateway {
    backend: Arc<dyn KeyValueBackend>,
    config: GatewayConfig,
}

impl PersistenceGateway {
    pub fn new(backend: Arc<dyn KeyValueBackend>, config: GatewayConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Reads every key independently.
    ///
    /// Never fails: a read error or undecodable value for one key is logged
    /// and that key falls back to its default.
    pub fn load(&self) -> LoadedState {
        let features = match self.read_key::<Vec<Feature>>(CollectionKey::Features) {
            KeyRead::Missing => None,
            KeyRead::Corrupt => Some(Vec::new()),
            KeyRead::Value(v) => Some(v),
        };

        let state = LoadedState {
            features,
            gps_logs: self.read_key(CollectionKey::GpsLogs).or_default(),
            photo_logs: self.read_key(CollectionKey::PhotoLogs).or_default(),
            command_logs: self.read_key(CollectionKey::CommandLogs).or_default(),
            email_queue: self.read_key(CollectionKey::EmailQueue).or_default(),
            email_address: self.read_email_address(),
        };

        info!(
            features = state.features.as_ref().map_or(0, Vec::len),
            gps_logs = state.gps_logs.len(),
            photo_logs = state.photo_logs.len(),
            command_logs = state.command_logs.len(),
            email_queue = state.email_queue.len(),
            "loaded persisted state"
        );
        state
    }

    fn read_raw(&self, key: CollectionKey) -> Option<String> {
        match self.backend.get(key.as_str()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%key, error = %e, "failed to read key, using default");
                None
            }
        }
    }

    fn read_key<T: DeserializeOwned>(&self, key: CollectionKey) -> KeyRead<T> {
        let Some(raw) = self.read_raw(key) else {
            debug!(%key, "key not present");
            return KeyRead::Missing;
        };
        match decode(key, &raw) {
            Ok(v) => KeyRead::Value(v),
            Err(e) => {
                warn!(%key, error = %e, "discarding corrupt value");
                KeyRead::Corrupt
            }
        }
    }

    // Older installs stored the address as a bare string rather than a JSON
    // string literal; accept both.
    fn read_email_address(&self) -> String {
        let Some(raw) = self.read_raw(CollectionKey::EmailAddress) else {
            return String::new();
        };
        decode::<String>(CollectionKey::EmailAddress, &raw).unwrap_or_else(|_| {
            let trimmed = raw.trim();
            if trimmed.starts_with(['"', '{', '[']) {
                warn!(key = %CollectionKey::EmailAddress, "discarding corrupt value");
                String::new()
            } else {
                trimmed.to_string()
            }
        })
    }

    /// Starts the write queue worker on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn start_writer(&self) -> WriteQueue {
        self.start_writer_on(&Handle::current())
    }

    /// Starts the write queue worker on the given runtime.
    pub fn start_writer_on(&self, runtime: &Handle) -> WriteQueue {
        WriteQueue::spawn_on(runtime, Arc::clone(&self.backend), &self.config)
    }
}
