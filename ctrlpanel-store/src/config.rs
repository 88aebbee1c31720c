use serde::{Deserialize, Serialize};

/// Configuration for the entity store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Platform identifier reported by `status` and email summaries.
    pub platform: String,
    /// Seed the built-in feature catalog when no feature list was ever saved.
    pub seed_default_features: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            seed_default_features: true,
        }
    }
}
