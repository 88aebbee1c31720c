//! JSON encoding of persisted records.

use crate::error::{StorageError, StorageResult};
use ctrlpanel_model::CollectionKey;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes a record for storage.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> StorageResult<String> {
    Ok(serde_json::to_string(value)?)
}

/// Deserializes a stored record, reporting failures as [`StorageError::Corrupt`].
///
/// Unknown fields are ignored so older builds can read records written by
/// newer ones.
pub fn decode<T: DeserializeOwned>(key: CollectionKey, raw: &str) -> StorageResult<T> {
    serde_json::from_str(raw).map_err(|e| StorageError::Corrupt {
        key,
        reason: e.to_string(),
    })
}
