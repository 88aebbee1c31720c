//! The entity store.

use crate::config::StoreConfig;
use crate::email::EmailComposer;
use crate::error::{StoreError, StoreResult};
use crate::sink::{NullSink, PersistenceSink};
use ctrlpanel_model::{
    COMMAND_LOG_CAP, CollectionKey, CommandLogEntry, DEFAULT_CATEGORY, DEFAULT_FEATURES,
    EmailQueueItem, Feature, GPS_LOG_CAP, GpsLogEntry, LogKind, PHOTO_LOG_CAP, PhotoLogEntry,
    Snapshot,
};
use ctrlpanel_storage::{LoadedState, StorageResult, encode};
use ctrlpanel_types::{Clock, IdGenerator, SystemClock, Timestamp, UuidV7Ids};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Injected capabilities: where time, ids and durability come from.
#[derive(Clone)]
pub struct StoreCapabilities {
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    pub sink: Arc<dyn PersistenceSink>,
}

impl Default for StoreCapabilities {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidV7Ids),
            sink: Arc::new(NullSink),
        }
    }
}

impl StoreCapabilities {
    /// System clock and UUID v7 ids, writing through `sink`.
    pub fn with_sink(sink: Arc<dyn PersistenceSink>) -> Self {
        Self {
            sink,
            ..Self::default()
        }
    }
}

/// Single authoritative owner of application state.
///
/// Mutations run to completion synchronously. Collections are only
/// reachable through [`snapshot`](Self::snapshot) and the read accessors,
/// which return owned copies or shared borrows.
pub struct EntityStore {
    features: Vec<Feature>,
    gps_logs: Vec<GpsLogEntry>,
    photo_logs: Vec<PhotoLogEntry>,
    command_logs: Vec<CommandLogEntry>,
    email_queue: Vec<EmailQueueItem>,
    email_address: String,
    online: bool,
    config: StoreConfig,
    caps: StoreCapabilities,
}

/// Inserts at the front and drops whatever falls past `cap`.
fn prepend_capped<T>(list: &mut Vec<T>, item: T, cap: usize) {
    list.insert(0, item);
    list.truncate(cap);
}

impl EntityStore {
    /// Creates an empty store. Nothing is seeded and nothing is written.
    pub fn new(config: StoreConfig, caps: StoreCapabilities) -> Self {
        Self {
            features: Vec::new(),
            gps_logs: Vec::new(),
            photo_logs: Vec::new(),
            command_logs: Vec::new(),
            email_queue: Vec::new(),
            email_address: String::new(),
            online: true,
            config,
            caps,
        }
    }

    /// Rebuilds the store from persisted state.
    ///
    /// Seeds the default feature catalog when the feature list was never
    /// saved and seeding is enabled. Log lists longer than their cap are
    /// trimmed, keeping the newest entries.
    pub fn restore(loaded: LoadedState, config: StoreConfig, caps: StoreCapabilities) -> Self {
        let LoadedState {
            features,
            mut gps_logs,
            mut photo_logs,
            mut command_logs,
            email_queue,
            email_address,
        } = loaded;
        gps_logs.truncate(GPS_LOG_CAP);
        photo_logs.truncate(PHOTO_LOG_CAP);
        command_logs.truncate(COMMAND_LOG_CAP);

        let needs_seed = features.is_none() && config.seed_default_features;
        let mut store = Self {
            features: features.unwrap_or_default(),
            gps_logs,
            photo_logs,
            command_logs,
            email_queue,
            email_address,
            online: true,
            config,
            caps,
        };
        if needs_seed {
            store.seed_default_features();
        }
        store
    }

    fn seed_default_features(&mut self) {
        let now = self.now();
        self.features = DEFAULT_FEATURES
            .iter()
            .map(|def| Feature {
                id: self.caps.ids.next_id(),
                name: def.name.to_string(),
                description: def.description.to_string(),
                category: def.category.to_string(),
                enabled: def.enabled,
                added_at: now,
            })
            .collect();
        info!(count = self.features.len(), "seeded default features");
        self.persist(CollectionKey::Features);
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current time on the store's clock.
    pub fn now(&self) -> Timestamp {
        self.caps.clock.now()
    }

    // ── Write-through ────────────────────────────────────────────

    fn encode_collection(&self, key: CollectionKey) -> StorageResult<String> {
        match key {
            CollectionKey::Features => encode(&self.features),
            CollectionKey::GpsLogs => encode(&self.gps_logs),
            CollectionKey::PhotoLogs => encode(&self.photo_logs),
            CollectionKey::CommandLogs => encode(&self.command_logs),
            CollectionKey::EmailQueue => encode(&self.email_queue),
            CollectionKey::EmailAddress => encode(&self.email_address),
        }
    }

    /// Mirrors one collection to the sink. The in-memory change has already
    /// committed and stays committed whatever happens here.
    fn persist(&self, key: CollectionKey) {
        let result = self
            .encode_collection(key)
            .and_then(|value| self.caps.sink.save(key, value));
        if let Err(e) = result {
            warn!(%key, error = %e, "persistence write-through failed");
        }
    }

    // ── Features ─────────────────────────────────────────────────

    /// Adds a disabled feature at the end of the display list.
    ///
    /// Name and description are trimmed and must be non-empty. A blank
    /// category becomes `Custom`.
    pub fn add_feature(
        &mut self,
        name: &str,
        description: &str,
        category: &str,
    ) -> StoreResult<Feature> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("Feature name cannot be empty".into()));
        }
        if description.is_empty() {
            return Err(StoreError::Validation(
                "Feature description cannot be empty".into(),
            ));
        }
        let category = match category.trim() {
            "" => DEFAULT_CATEGORY,
            c => c,
        };

        let feature = Feature {
            id: self.caps.ids.next_id(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            enabled: false,
            added_at: self.now(),
        };
        self.features.push(feature.clone());
        debug!(id = %feature.id, name = %feature.name, "feature added");
        self.persist(CollectionKey::Features);
        Ok(feature)
    }

    /// Removes a feature. Absent ids are a successful no-op returning `None`.
    pub fn remove_feature(&mut self, id: &str) -> Option<Feature> {
        let index = self.features.iter().position(|f| f.id == *id)?;
        let removed = self.features.remove(index);
        debug!(id = %removed.id, "feature removed");
        self.persist(CollectionKey::Features);
        Some(removed)
    }

    /// Flips `enabled` and returns the updated feature.
    pub fn toggle_feature(&mut self, id: &str) -> StoreResult<Feature> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| f.id == *id)
            .ok_or_else(|| StoreError::NotFound(format!("Feature not found: {id}")))?;
        feature.enabled = !feature.enabled;
        let updated = feature.clone();
        debug!(id = %updated.id, enabled = updated.enabled, "feature toggled");
        self.persist(CollectionKey::Features);
        Ok(updated)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    // ── Capture & command logs ───────────────────────────────────

    /// Records a location sample, newest first, keeping at most 200.
    ///
    /// NaN or infinite coordinates are rejected: JSON has no encoding for
    /// them, so one bad sample would make the whole persisted log unreadable.
    pub fn append_gps_log(
        &mut self,
        lat: f64,
        lng: f64,
        accuracy: u32,
    ) -> StoreResult<GpsLogEntry> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(StoreError::Validation(format!(
                "Location must be finite, got ({lat}, {lng})"
            )));
        }
        let entry = GpsLogEntry {
            id: self.caps.ids.next_id(),
            lat,
            lng,
            accuracy,
            timestamp: self.now(),
        };
        prepend_capped(&mut self.gps_logs, entry.clone(), GPS_LOG_CAP);
        self.persist(CollectionKey::GpsLogs);
        Ok(entry)
    }

    /// Records a captured photo, newest first, keeping at most 100.
    pub fn append_photo_log(&mut self, uri: &str) -> PhotoLogEntry {
        let entry = PhotoLogEntry {
            id: self.caps.ids.next_id(),
            uri: uri.to_string(),
            timestamp: self.now(),
        };
        prepend_capped(&mut self.photo_logs, entry.clone(), PHOTO_LOG_CAP);
        self.persist(CollectionKey::PhotoLogs);
        entry
    }

    /// Records an executed command, newest first, keeping at most 500.
    pub fn append_command_log(
        &mut self,
        command: &str,
        result: &str,
        kind: LogKind,
    ) -> CommandLogEntry {
        let entry = CommandLogEntry {
            id: self.caps.ids.next_id(),
            command: command.to_string(),
            result: result.to_string(),
            kind,
            timestamp: self.now(),
        };
        prepend_capped(&mut self.command_logs, entry.clone(), COMMAND_LOG_CAP);
        self.persist(CollectionKey::CommandLogs);
        entry
    }

    pub fn clear_command_logs(&mut self) {
        self.command_logs.clear();
        self.persist(CollectionKey::CommandLogs);
    }

    pub fn clear_gps_logs(&mut self) {
        self.gps_logs.clear();
        self.persist(CollectionKey::GpsLogs);
    }

    // ── Email ────────────────────────────────────────────────────

    /// Appends an unsent email to the queue. Delivery is external.
    pub fn enqueue_email(&mut self, subject: &str, body: &str) -> EmailQueueItem {
        let item = EmailQueueItem {
            id: self.caps.ids.next_id(),
            subject: subject.to_string(),
            body: body.to_string(),
            created_at: self.now(),
            sent: false,
        };
        self.email_queue.push(item.clone());
        debug!(id = %item.id, "email queued");
        self.persist(CollectionKey::EmailQueue);
        item
    }

    /// Replaces the configured address. No format validation.
    pub fn set_email_address(&mut self, value: &str) {
        self.email_address = value.to_string();
        self.persist(CollectionKey::EmailAddress);
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    /// Marks a queued email as handed off.
    pub fn mark_email_sent(&mut self, id: &str) -> StoreResult<EmailQueueItem> {
        let item = self
            .email_queue
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or_else(|| StoreError::NotFound(format!("Queued email not found: {id}")))?;
        item.sent = true;
        let updated = item.clone();
        self.persist(CollectionKey::EmailQueue);
        Ok(updated)
    }

    /// Hands a queued email to the mail client and marks it sent.
    ///
    /// The item stays unsent if the handoff fails.
    pub fn dispatch_email(
        &mut self,
        id: &str,
        composer: &dyn EmailComposer,
    ) -> StoreResult<EmailQueueItem> {
        let address = self.email_address.trim();
        if address.is_empty() {
            return Err(StoreError::Validation(
                "No email address configured".into(),
            ));
        }
        let item = self
            .email_queue
            .iter()
            .find(|e| e.id == *id)
            .ok_or_else(|| StoreError::NotFound(format!("Queued email not found: {id}")))?;
        composer.compose(address, &item.subject, &item.body)?;
        self.mark_email_sent(id)
    }

    /// Drops every email already handed off. Returns how many were removed.
    pub fn clear_sent_emails(&mut self) -> usize {
        let before = self.email_queue.len();
        self.email_queue.retain(|e| !e.sent);
        let removed = before - self.email_queue.len();
        if removed > 0 {
            self.persist(CollectionKey::EmailQueue);
        }
        removed
    }

    // ── Connectivity ─────────────────────────────────────────────

    /// Updates the in-memory connectivity flag. Not persisted.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Point-in-time copy of all state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            features: self.features.clone(),
            gps_logs: self.gps_logs.clone(),
            photo_logs: self.photo_logs.clone(),
            command_logs: self.command_logs.clone(),
            email_queue: self.email_queue.clone(),
            email_address: self.email_address.clone(),
            online: self.online,
            taken_at: self.now(),
        }
    }
}
