use crate::{CommandLogEntry, EmailQueueItem, Feature, GpsLogEntry, PhotoLogEntry};
use ctrlpanel_types::Timestamp;
use serde::{Deserialize, Serialize};

/// Read-only, point-in-time copy of all store state.
///
/// Owned data only; holding a snapshot never blocks or observes later
/// mutations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub features: Vec<Feature>,
    pub gps_logs: Vec<GpsLogEntry>,
    pub photo_logs: Vec<PhotoLogEntry>,
    pub command_logs: Vec<CommandLogEntry>,
    pub email_queue: Vec<EmailQueueItem>,
    pub email_address: String,
    #[serde(default)]
    pub online: bool,
    /// Store clock reading when the snapshot was taken.
    #[serde(default)]
    pub taken_at: Timestamp,
}

impl Snapshot {
    /// Number of enabled features.
    pub fn enabled_count(&self) -> usize {
        self.features.iter().filter(|f| f.enabled).count()
    }

    /// Looks up a feature by exact id.
    pub fn feature_by_id(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == *id)
    }

    /// Looks up a feature by exact id, falling back to a case-insensitive
    /// full-name match.
    pub fn find_feature(&self, id_or_name: &str) -> Option<&Feature> {
        self.feature_by_id(id_or_name)
            .or_else(|| self.features.iter().find(|f| f.name_matches(id_or_name)))
    }

    /// The configured email address, if any.
    pub fn email(&self) -> Option<&str> {
        let trimmed = self.email_address.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Queued emails not yet handed to the mail client.
    pub fn pending_emails(&self) -> impl Iterator<Item = &EmailQueueItem> {
        self.email_queue.iter().filter(|e| !e.sent)
    }
}
