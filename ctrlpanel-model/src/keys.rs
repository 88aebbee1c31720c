use serde::{Deserialize, Serialize};
use std::fmt;

/// The six independently persisted records.
///
/// Each key is read and written on its own; a write for one key never
/// touches another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectionKey {
    #[serde(rename = "features")]
    Features,
    #[serde(rename = "gpsLogs")]
    GpsLogs,
    #[serde(rename = "photoLogs")]
    PhotoLogs,
    #[serde(rename = "commandLogs")]
    CommandLogs,
    #[serde(rename = "emailQueue")]
    EmailQueue,
    #[serde(rename = "emailAddress")]
    EmailAddress,
}

impl CollectionKey {
    /// The storage key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Features => "features",
            Self::GpsLogs => "gpsLogs",
            Self::PhotoLogs => "photoLogs",
            Self::CommandLogs => "commandLogs",
            Self::EmailQueue => "emailQueue",
            Self::EmailAddress => "emailAddress",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
