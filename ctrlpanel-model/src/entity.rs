use ctrlpanel_types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to user-created features that don't name one.
pub const DEFAULT_CATEGORY: &str = "Custom";

/// A toggleable capability record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub enabled: bool,
    pub added_at: Timestamp,
}

impl Feature {
    /// Case-insensitive comparison of the full feature name.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase() == query.to_lowercase()
    }

    /// `[ON]` / `[OFF]` marker used in listings and summaries.
    pub fn status_marker(&self) -> &'static str {
        if self.enabled { "[ON]" } else { "[OFF]" }
    }
}

/// One geolocation sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsLogEntry {
    pub id: RecordId,
    pub lat: f64,
    pub lng: f64,
    /// Horizontal accuracy in meters.
    pub accuracy: u32,
    pub timestamp: Timestamp,
}

/// One captured photo, referenced by an opaque local resource handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoLogEntry {
    pub id: RecordId,
    pub uri: String,
    pub timestamp: Timestamp,
}

/// Outcome tag of a recorded command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Success,
    Error,
    Info,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command as typed, with the message it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandLogEntry {
    pub id: RecordId,
    pub command: String,
    pub result: String,
    pub kind: LogKind,
    pub timestamp: Timestamp,
}

/// An outgoing email waiting for the external mail client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailQueueItem {
    pub id: RecordId,
    pub subject: String,
    pub body: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub sent: bool,
}
