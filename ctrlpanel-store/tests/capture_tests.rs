mod common;

use common::{make_store, queued_store, reload};
use ctrlpanel_model::CollectionKey;
use ctrlpanel_storage::MemoryBackend;
use ctrlpanel_store::{
    CaptureEvent, CaptureRecord, LocationFix, LocationSource, SharedStore, StoreError,
    TrackingConfig, spawn_location_tracking,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

fn shared() -> SharedStore {
    let (store, _, _) = make_store();
    SharedStore::new(store)
}

// ── Capture events ───────────────────────────────────────────────

#[test]
fn photo_event_appends_photo_log() {
    let store = shared();
    let entry = store.on_photo_captured("file:///dcim/1.jpg");
    assert_eq!(store.snapshot().photo_logs, vec![entry]);
}

#[test]
fn location_event_appends_gps_log() {
    let store = shared();
    let entry = store.on_location_sampled(51.5, -0.12, 9).unwrap();
    let snap = store.snapshot();
    assert_eq!(snap.gps_logs, vec![entry]);
    assert_eq!(snap.gps_logs[0].accuracy, 9);
}

#[test]
fn non_finite_location_is_rejected() {
    let (mut plain, sink, _) = make_store();
    for (lat, lng) in [(f64::NAN, 1.0), (1.0, f64::INFINITY), (f64::NEG_INFINITY, 0.0)] {
        let err = plain.append_gps_log(lat, lng, 5).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
    assert!(plain.snapshot().gps_logs.is_empty());
    assert!(sink.keys().is_empty());

    let store = shared();
    let record = store.on_capture(CaptureEvent::LocationSampled {
        lat: f64::NAN,
        lng: 0.0,
        accuracy: 1,
    });
    assert!(record.is_err());
    assert!(store.snapshot().gps_logs.is_empty());
}

#[tokio::test]
async fn bad_sample_does_not_cost_the_persisted_gps_log() {
    let backend = Arc::new(MemoryBackend::new());
    let (store, queue) = queued_store(&backend);
    let store = SharedStore::new(store);
    for i in 0..5 {
        store.on_location_sampled(f64::from(i), 1.0, 5).unwrap();
    }
    assert!(store.on_location_sampled(f64::NAN, 1.0, 5).is_err());
    queue.flush().await.unwrap();

    let raw = backend.entries()[CollectionKey::GpsLogs.as_str()].clone();
    assert!(!raw.contains("null"));
    let reloaded = reload(&backend).snapshot();
    assert_eq!(reloaded.gps_logs.len(), 5);
    assert_eq!(reloaded.gps_logs, store.snapshot().gps_logs);
}

#[test]
fn capture_event_dispatch() {
    let store = shared();
    let record = store.on_capture(CaptureEvent::LocationSampled {
        lat: 1.0,
        lng: 2.0,
        accuracy: 3,
    });
    assert!(matches!(record, Ok(CaptureRecord::Location(_))));
    let record = store.on_capture(CaptureEvent::PhotoCaptured { uri: "u".into() });
    assert!(matches!(record, Ok(CaptureRecord::Photo(_))));
}

#[test]
fn capture_event_json_shape() {
    let event: CaptureEvent =
        serde_json::from_str(r#"{"type":"photo_captured","uri":"file:///x.jpg"}"#).unwrap();
    assert_eq!(event, CaptureEvent::PhotoCaptured { uri: "file:///x.jpg".into() });
}

// ── Serialized access ────────────────────────────────────────────

#[test]
fn concurrent_writers_respect_cap_and_unique_ids() {
    let store = shared();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    store.on_location_sampled(f64::from(t), f64::from(i), 1).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snap = store.snapshot();
    assert_eq!(snap.gps_logs.len(), 200);
    let mut ids: Vec<_> = snap.gps_logs.iter().map(|e| e.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

// ── Tracking driver ──────────────────────────────────────────────

struct CountingSource {
    calls: Arc<AtomicUsize>,
}

impl LocationSource for CountingSource {
    fn sample(&mut self) -> Option<LocationFix> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        // Every third reading has no fix.
        (n % 3 != 2).then_some(LocationFix {
            lat: 10.0,
            lng: 20.0,
            accuracy: 5,
        })
    }
}

struct GlitchySource {
    calls: usize,
}

impl LocationSource for GlitchySource {
    fn sample(&mut self) -> Option<LocationFix> {
        self.calls += 1;
        let lat = if self.calls == 1 { f64::NAN } else { 45.0 };
        Some(LocationFix {
            lat,
            lng: 7.0,
            accuracy: 3,
        })
    }
}

#[test]
fn default_tracking_interval_is_thirty_seconds() {
    assert_eq!(TrackingConfig::default().interval_secs, 30);
}

#[tokio::test(start_paused = true)]
async fn tracking_samples_on_interval() {
    let store = shared();
    let calls = Arc::new(AtomicUsize::new(0));
    let handle = spawn_location_tracking(
        store.clone(),
        CountingSource {
            calls: calls.clone(),
        },
        TrackingConfig::default(),
    );

    // Samples at t = 0s, 30s, 60s, 90s.
    tokio::time::sleep(Duration::from_secs(100)).await;
    assert!(handle.is_running());
    handle.stop();

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    // The third reading had no fix.
    assert_eq!(store.snapshot().gps_logs.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn stopped_tracking_records_nothing_more() {
    let store = shared();
    let calls = Arc::new(AtomicUsize::new(0));
    let handle = spawn_location_tracking(
        store.clone(),
        CountingSource {
            calls: calls.clone(),
        },
        TrackingConfig { interval_secs: 5 },
    );
    tokio::time::sleep(Duration::from_secs(1)).await;
    handle.stop();
    let before = calls.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(calls.load(Ordering::SeqCst), before);
}

#[tokio::test(start_paused = true)]
async fn tracking_skips_non_finite_fixes() {
    let store = shared();
    let handle = spawn_location_tracking(
        store.clone(),
        GlitchySource { calls: 0 },
        TrackingConfig { interval_secs: 10 },
    );

    // Samples at t = 0s (NaN), 10s and 20s.
    tokio::time::sleep(Duration::from_secs(25)).await;
    assert!(handle.is_running());
    handle.stop();

    let logs = store.snapshot().gps_logs;
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|e| e.lat == 45.0));
}
