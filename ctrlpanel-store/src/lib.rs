//! Entity store for the control panel.
//!
//! The single authoritative owner of application state: features, capture
//! logs, command logs, the outgoing email queue, the configured email
//! address and the connectivity flag.
//!
//! # Architecture
//!
//! - [`EntityStore`] mutates synchronously and hands out owned [`Snapshot`]s
//! - Every committed mutation is mirrored through a [`PersistenceSink`] for
//!   the one collection it changed; sink failures are logged, never returned
//! - [`SharedStore`] serializes all access behind one mutation lock for
//!   multi-threaded hosts
//! - Capture adapters ([`CaptureEvent`], [`spawn_location_tracking`]) feed
//!   photo and location samples in; the store has no tracking mode of its own
//! - [`EmailComposer`] is the outbound handoff to the platform mail client
//!
//! Time and ids come from the injected [`Clock`](ctrlpanel_types::Clock) and
//! [`IdGenerator`](ctrlpanel_types::IdGenerator).
//!
//! [`Snapshot`]: ctrlpanel_model::Snapshot

mod capture;
mod config;
mod email;
mod error;
mod shared;
mod sink;
mod store;

pub use capture::{
    CaptureEvent, CaptureRecord, LocationFix, LocationSource, TrackingConfig, TrackingHandle,
    spawn_location_tracking,
};
pub use config::StoreConfig;
pub use email::{ComposeError, EmailComposer};
pub use error::{StoreError, StoreResult};
pub use shared::SharedStore;
pub use sink::{NullSink, PersistenceSink};
pub use store::{EntityStore, StoreCapabilities};
