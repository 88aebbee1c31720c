//! Built-in features seeded on first run.

/// A seedable feature definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultFeature {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub enabled: bool,
}

/// Features present on a fresh install, in display order.
pub const DEFAULT_FEATURES: &[DefaultFeature] = &[
    DefaultFeature {
        name: "Camera Capture",
        description: "Take photos and keep a local capture log",
        category: "Sensors",
        enabled: true,
    },
    DefaultFeature {
        name: "GPS Tracking",
        description: "Record location samples while tracking is active",
        category: "Sensors",
        enabled: true,
    },
    DefaultFeature {
        name: "Command Terminal",
        description: "Text command interface for managing the panel",
        category: "Tools",
        enabled: true,
    },
    DefaultFeature {
        name: "Email Sync",
        description: "Queue status summaries for the configured email address",
        category: "Communication",
        enabled: false,
    },
    DefaultFeature {
        name: "Offline Mode",
        description: "Keep working without a network connection",
        category: "System",
        enabled: true,
    },
    DefaultFeature {
        name: "Admin Controls",
        description: "Add, remove and toggle features from the admin tab",
        category: "System",
        enabled: false,
    },
];
