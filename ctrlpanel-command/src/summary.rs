//! Content of the `sync-email` status summary.

use ctrlpanel_model::Snapshot;
use std::fmt::Write;

pub fn summary_subject(snapshot: &Snapshot) -> String {
    format!("Control Panel Summary - {}", snapshot.taken_at.date_string())
}

pub fn summary_body(snapshot: &Snapshot, platform: &str) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "Control Panel Status Report");
    let _ = writeln!(body, "Generated: {}", snapshot.taken_at);
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Features: {}/{} enabled",
        snapshot.enabled_count(),
        snapshot.features.len()
    );
    let _ = writeln!(body, "GPS logs: {}", snapshot.gps_logs.len());
    let _ = writeln!(body, "Photos: {}", snapshot.photo_logs.len());
    let _ = writeln!(body, "Commands run: {}", snapshot.command_logs.len());
    let _ = writeln!(body);
    for feature in &snapshot.features {
        let _ = writeln!(body, "{} {}", feature.status_marker(), feature.name);
    }
    let _ = writeln!(body);
    let _ = write!(body, "Platform: {platform}");
    body
}
