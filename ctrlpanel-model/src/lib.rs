//! Entity model for the control panel.
//!
//! Defines the records the entity store owns and the shapes it hands out:
//! - [`Feature`]: a toggleable capability record with a category tag
//! - [`GpsLogEntry`], [`PhotoLogEntry`], [`CommandLogEntry`]: capped, newest-first logs
//! - [`EmailQueueItem`]: an outgoing email awaiting handoff to the mail client
//! - [`CollectionKey`]: the six independently persisted records
//! - [`Snapshot`]: an immutable point-in-time copy of the whole store
//!
//! All types serialize with camelCase field names, which is the persisted
//! format and the format the presentation layer reads over FFI.

mod catalog;
mod entity;
mod keys;
mod snapshot;

pub use catalog::{DEFAULT_FEATURES, DefaultFeature};
pub use entity::{
    CommandLogEntry, DEFAULT_CATEGORY, EmailQueueItem, Feature, GpsLogEntry, LogKind,
    PhotoLogEntry,
};
pub use keys::CollectionKey;
pub use snapshot::Snapshot;

/// Maximum number of GPS log entries retained.
pub const GPS_LOG_CAP: usize = 200;

/// Maximum number of photo log entries retained.
pub const PHOTO_LOG_CAP: usize = 100;

/// Maximum number of command log entries retained.
pub const COMMAND_LOG_CAP: usize = 500;
