use ctrlpanel_command::{Console, summary_body};
use ctrlpanel_model::LogKind;
use ctrlpanel_store::{EntityStore, SharedStore, StoreCapabilities, StoreConfig};
use ctrlpanel_types::{ManualClock, SequentialIds, Timestamp};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

fn make_store() -> EntityStore {
    let caps = StoreCapabilities {
        clock: Arc::new(ManualClock::new(Timestamp::from_millis(1_700_000_000_000))),
        ids: Arc::new(SequentialIds::new("id")),
        ..Default::default()
    };
    let config = StoreConfig {
        platform: "ios".into(),
        seed_default_features: false,
    };
    EntityStore::new(config, caps)
}

// ── Logging by the caller ────────────────────────────────────────

#[test]
fn success_is_logged_as_success() {
    let mut store = make_store();
    let result = Console::default().run(&mut store, "help");
    assert!(result.success);
    let logs = store.snapshot().command_logs;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].command, "help");
    assert_eq!(logs[0].kind, LogKind::Success);
}

#[test]
fn failure_is_logged_as_error() {
    let mut store = make_store();
    let result = Console::default().run(&mut store, "bogus");
    assert!(!result.success);
    let logs = store.snapshot().command_logs;
    assert_eq!(logs[0].kind, LogKind::Error);
    assert_eq!(logs[0].result, "Unknown command: 'bogus'");
}

#[test]
fn empty_input_is_logged() {
    let mut store = make_store();
    Console::default().run(&mut store, "   ");
    let logs = store.snapshot().command_logs;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].command, "");
    assert_eq!(logs[0].kind, LogKind::Error);
}

#[test]
fn failed_enable_only_appends_an_error_entry() {
    let mut store = make_store();
    let console = Console::default();
    console.run(&mut store, "help");
    console.run(&mut store, "list");
    let before = store.snapshot().command_logs;

    let result = console.run(&mut store, "enable nonexistent-id");
    assert!(!result.success);

    let after = store.snapshot().command_logs;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[1..], before.as_slice());
    assert_eq!(after[0].kind, LogKind::Error);
}

// ── Store effects ────────────────────────────────────────────────

#[test]
fn add_creates_feature() {
    let mut store = make_store();
    let console = Console::default();
    assert!(console.run(&mut store, "add foo|bar|baz").success);
    assert!(console.run(&mut store, "add qux|quux").success);

    let features = store.snapshot().features;
    assert_eq!(features.len(), 2);
    assert_eq!(
        (features[0].name.as_str(), features[0].description.as_str(), features[0].category.as_str(), features[0].enabled),
        ("foo", "bar", "baz", false)
    );
    assert_eq!(features[1].category, "Custom");
}

#[test]
fn malformed_add_creates_nothing() {
    let mut store = make_store();
    let result = Console::default().run(&mut store, "add foo");
    assert!(!result.success);
    assert!(store.features().is_empty());
}

#[test]
fn enable_then_disable_by_name() {
    let mut store = make_store();
    let console = Console::default();
    console.run(&mut store, "add Night Light|Dims the screen");
    assert!(console.run(&mut store, "enable night light").success);
    assert!(store.features()[0].enabled);
    assert!(console.run(&mut store, "disable NIGHT LIGHT").success);
    assert!(!store.features()[0].enabled);
}

#[test]
fn remove_by_id() {
    let mut store = make_store();
    let console = Console::default();
    console.run(&mut store, "add a|b");
    let id = store.features()[0].id.clone();
    assert!(console.run(&mut store, &format!("remove {id}")).success);
    assert!(store.features().is_empty());
    assert!(!console.run(&mut store, &format!("remove {id}")).success);
}

#[test]
fn clear_logs_leaves_only_its_own_entry() {
    let mut store = make_store();
    let console = Console::default();
    console.run(&mut store, "help");
    console.run(&mut store, "version");
    console.run(&mut store, "clear-logs");
    let logs = store.snapshot().command_logs;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].command, "clear-logs");
}

#[test]
fn clear_gps_empties_gps_log() {
    let mut store = make_store();
    store.append_gps_log(1.0, 2.0, 3).unwrap();
    assert!(Console::default().run(&mut store, "clear-gps").success);
    assert!(store.snapshot().gps_logs.is_empty());
}

#[test]
fn sync_email_after_setting_address() {
    let mut store = make_store();
    let console = Console::default();

    assert!(!console.run(&mut store, "sync-email").success);
    assert!(store.snapshot().email_queue.is_empty());

    store.set_email_address("a@b.com");
    assert!(console.run(&mut store, "sync-email").success);

    let queue = store.snapshot().email_queue;
    assert_eq!(queue.len(), 1);
    assert!(!queue[0].sent);
    assert_eq!(queue[0].subject, "Control Panel Summary - 2023-11-14");
}

#[test]
fn summary_body_lists_features() {
    let mut store = make_store();
    let console = Console::default();
    console.run(&mut store, "add Alpha|first");
    console.run(&mut store, "add Beta|second");
    console.run(&mut store, "enable alpha");
    let body = summary_body(&store.snapshot(), "ios");
    assert!(body.contains("Features: 1/2 enabled"));
    assert!(body.contains("[ON] Alpha"));
    assert!(body.contains("[OFF] Beta"));
    assert!(body.ends_with("Platform: ios"));
}

#[test]
fn shared_console_runs_under_lock() {
    let shared = SharedStore::new(make_store());
    let result = Console::default().run_shared(&shared, "add a|b");
    assert!(result.success);
    let snap = shared.snapshot();
    assert_eq!(snap.features.len(), 1);
    assert_eq!(snap.command_logs.len(), 1);
}

proptest! {
    #[test]
    fn arbitrary_input_never_panics_and_is_always_logged(input in ".{0,80}") {
        let mut store = make_store();
        let result = Console::default().run(&mut store, &input);
        let logs = store.snapshot().command_logs;
        prop_assert_eq!(logs.len(), 1);
        let expected = if result.success { LogKind::Success } else { LogKind::Error };
        prop_assert_eq!(logs[0].kind, expected);
    }
}
