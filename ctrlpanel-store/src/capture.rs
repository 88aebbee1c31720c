//! Capture adapters: inbound photo and location events.
//!
//! The camera and geolocation APIs live in the presentation layer. They
//! report what they captured through these shapes; the store only records
//! whatever samples arrive.

use crate::error::StoreResult;
use crate::shared::SharedStore;
use crate::store::EntityStore;
use ctrlpanel_model::{GpsLogEntry, PhotoLogEntry};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// A raw event produced by a capture adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaptureEvent {
    PhotoCaptured { uri: String },
    LocationSampled { lat: f64, lng: f64, accuracy: u32 },
}

/// What a capture event turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureRecord {
    Photo(PhotoLogEntry),
    Location(GpsLogEntry),
}

impl CaptureEvent {
    /// Appends the event to the matching log.
    pub fn record(self, store: &mut EntityStore) -> StoreResult<CaptureRecord> {
        match self {
            Self::PhotoCaptured { uri } => Ok(CaptureRecord::Photo(store.append_photo_log(&uri))),
            Self::LocationSampled { lat, lng, accuracy } => store
                .append_gps_log(lat, lng, accuracy)
                .map(CaptureRecord::Location),
        }
    }
}

impl SharedStore {
    pub fn on_capture(&self, event: CaptureEvent) -> StoreResult<CaptureRecord> {
        self.with(|store| event.record(store))
    }

    pub fn on_photo_captured(&self, uri: &str) -> PhotoLogEntry {
        self.with(|store| store.append_photo_log(uri))
    }

    /// Fails without touching the log when a coordinate is not finite.
    pub fn on_location_sampled(
        &self,
        lat: f64,
        lng: f64,
        accuracy: u32,
    ) -> StoreResult<GpsLogEntry> {
        self.with(|store| store.append_gps_log(lat, lng, accuracy))
    }
}

// ── Location polling ─────────────────────────────────────────────

/// A single position reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub lat: f64,
    pub lng: f64,
    pub accuracy: u32,
}

/// Platform geolocation provider.
pub trait LocationSource: Send + 'static {
    /// Takes one reading. `None` when no fix is available right now.
    fn sample(&mut self) -> Option<LocationFix>;
}

/// Configuration for the polling driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Seconds between samples.
    pub interval_secs: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

/// Running polling task. Stops when [`stop`](Self::stop) is called or the
/// handle is dropped.
pub struct TrackingHandle {
    task: JoinHandle<()>,
}

impl TrackingHandle {
    pub fn stop(self) {
        self.task.abort();
        info!("location tracking stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for TrackingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Samples `source` immediately and then every `interval_secs`, feeding
/// each fix into the store.
///
/// # Panics
/// Panics if called outside a tokio runtime.
pub fn spawn_location_tracking(
    store: SharedStore,
    mut source: impl LocationSource,
    config: TrackingConfig,
) -> TrackingHandle {
    let period = Duration::from_secs(config.interval_secs.max(1));
    info!(interval_secs = period.as_secs(), "location tracking started");

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match source.sample() {
                Some(fix) => {
                    if let Err(e) = store.on_location_sampled(fix.lat, fix.lng, fix.accuracy) {
                        warn!(error = %e, "discarding location fix");
                    }
                }
                None => debug!("no location fix available"),
            }
        }
    });
    TrackingHandle { task }
}
