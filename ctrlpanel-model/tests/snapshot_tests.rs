use ctrlpanel_model::{
    CollectionKey, DEFAULT_FEATURES, EmailQueueItem, Feature, Snapshot,
};
use ctrlpanel_types::{RecordId, Timestamp};

fn feature(id: &str, name: &str, enabled: bool) -> Feature {
    Feature {
        id: RecordId::new(id),
        name: name.into(),
        description: "d".into(),
        category: "Custom".into(),
        enabled,
        added_at: Timestamp::from_millis(0),
    }
}

// ── Lookup ────────────────────────────────────────────────────────

#[test]
fn find_feature_prefers_id() {
    let snap = Snapshot {
        features: vec![feature("alpha", "beta", false), feature("beta", "alpha", true)],
        ..Default::default()
    };
    assert_eq!(snap.find_feature("beta").unwrap().id.as_str(), "beta");
}

#[test]
fn find_feature_falls_back_to_name() {
    let snap = Snapshot {
        features: vec![feature("f-1", "Camera Capture", false)],
        ..Default::default()
    };
    assert_eq!(snap.find_feature("camera capture").unwrap().id.as_str(), "f-1");
    assert!(snap.find_feature("camera").is_none());
}

#[test]
fn enabled_count() {
    let snap = Snapshot {
        features: vec![
            feature("a", "A", true),
            feature("b", "B", false),
            feature("c", "C", true),
        ],
        ..Default::default()
    };
    assert_eq!(snap.enabled_count(), 2);
}

#[test]
fn email_is_none_when_blank() {
    let mut snap = Snapshot::default();
    assert_eq!(snap.email(), None);
    snap.email_address = "   ".into();
    assert_eq!(snap.email(), None);
    snap.email_address = "a@b.com".into();
    assert_eq!(snap.email(), Some("a@b.com"));
}

#[test]
fn pending_emails_skips_sent() {
    let item = |id: &str, sent| EmailQueueItem {
        id: RecordId::new(id),
        subject: "s".into(),
        body: "b".into(),
        created_at: Timestamp::from_millis(0),
        sent,
    };
    let snap = Snapshot {
        email_queue: vec![item("e-1", true), item("e-2", false)],
        ..Default::default()
    };
    let pending: Vec<_> = snap.pending_emails().map(|e| e.id.as_str()).collect();
    assert_eq!(pending, vec!["e-2"]);
}

// ── Keys & catalog ────────────────────────────────────────────────

#[test]
fn collection_keys_match_storage_names() {
    let keys = [
        CollectionKey::Features,
        CollectionKey::GpsLogs,
        CollectionKey::PhotoLogs,
        CollectionKey::CommandLogs,
        CollectionKey::EmailQueue,
        CollectionKey::EmailAddress,
    ];
    let names: Vec<_> = keys.iter().map(CollectionKey::as_str).collect();
    assert_eq!(
        names,
        vec!["features", "gpsLogs", "photoLogs", "commandLogs", "emailQueue", "emailAddress"]
    );
    for key in keys {
        assert_eq!(serde_json::to_string(&key).unwrap(), format!("\"{key}\""));
    }
}

#[test]
fn default_catalog_has_unique_nonempty_names() {
    let mut names: Vec<_> = DEFAULT_FEATURES.iter().map(|f| f.name.to_lowercase()).collect();
    assert!(DEFAULT_FEATURES.iter().all(|f| !f.name.is_empty() && !f.description.is_empty()));
    names.sort();
    names.dedup();
    assert_eq!(names.len(), DEFAULT_FEATURES.len());
}
