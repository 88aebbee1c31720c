//! Verb dispatch.

use crate::error::CommandError;
use crate::mutation::StoreMutation;
use crate::result::CommandResult;
use crate::summary::{summary_body, summary_subject};
use crate::verb::{ParsedCommand, Verb, parse};
use ctrlpanel_model::{DEFAULT_CATEGORY, Feature, Snapshot};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Usage text returned by `help`.
pub const HELP_TEXT: &str = "\
Available commands:
  help                                 Show this help
  list                                 List all features
  enable <id|name>                     Enable a feature
  disable <id|name>                    Disable a feature
  add <name> | <description> | [cat]   Add a new feature
  remove <id>                          Remove a feature
  status                               Show system status
  clear-logs                           Clear the command log
  clear-gps                            Clear the GPS log
  sync-email                           Queue a status summary email
  version                              Show version";

/// Configuration for the interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Platform identifier reported by `status`.
    pub platform: String,
    /// Version reported by `status` and `version`.
    pub version: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

type CommandOutcome = Result<CommandResult, CommandError>;

/// Stateless command interpreter.
#[derive(Debug, Clone, Default)]
pub struct CommandInterpreter {
    config: InterpreterConfig,
}

impl CommandInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Runs one command line. Never panics or errors: every failure comes
    /// back as a result with `success = false`, and a failed command leaves
    /// the store untouched.
    pub fn execute(
        &self,
        input: &str,
        snapshot: &Snapshot,
        store: &mut dyn StoreMutation,
    ) -> CommandResult {
        match parse(input).and_then(|cmd| self.dispatch(&cmd, snapshot, store)) {
            Ok(result) => result,
            Err(err) => err.into(),
        }
    }

    fn dispatch(
        &self,
        cmd: &ParsedCommand<'_>,
        snapshot: &Snapshot,
        store: &mut dyn StoreMutation,
    ) -> CommandOutcome {
        match cmd.verb {
            Verb::Help => Ok(CommandResult::ok(HELP_TEXT)),
            Verb::List => Ok(list(snapshot)),
            Verb::Enable => set_enabled(cmd, snapshot, store, true),
            Verb::Disable => set_enabled(cmd, snapshot, store, false),
            Verb::Add => add(cmd, store),
            Verb::Remove => remove(cmd, snapshot, store),
            Verb::Status => Ok(self.status(snapshot)),
            Verb::ClearLogs => {
                store.clear_command_logs();
                Ok(CommandResult::ok("Command logs cleared"))
            }
            Verb::ClearGps => {
                store.clear_gps_logs();
                Ok(CommandResult::ok("GPS logs cleared"))
            }
            Verb::SyncEmail => self.sync_email(snapshot, store),
            Verb::Version => Ok(CommandResult::ok(self.version_banner())),
        }
    }

    fn version_banner(&self) -> String {
        format!("Control Panel v{}", self.config.version)
    }

    fn status(&self, snapshot: &Snapshot) -> CommandResult {
        let enabled = snapshot.enabled_count();
        let total = snapshot.features.len();
        let email = snapshot.email();
        let message = format!(
            "Features: {enabled}/{total} enabled\nEmail: {}\nPlatform: {}\nVersion: {}",
            email.unwrap_or("not configured"),
            self.config.platform,
            self.config.version,
        );
        CommandResult::ok_with(
            message,
            json!({
                "enabled": enabled,
                "total": total,
                "email": email,
                "platform": self.config.platform,
                "version": self.config.version,
            }),
        )
    }

    fn sync_email(&self, snapshot: &Snapshot, store: &mut dyn StoreMutation) -> CommandOutcome {
        let address = snapshot.email().ok_or_else(|| {
            CommandError::Validation(
                "No email address configured. Set one in the Admin tab first.".into(),
            )
        })?;
        let item = store.enqueue_email(
            &summary_subject(snapshot),
            &summary_body(snapshot, &self.config.platform),
        );
        Ok(CommandResult::ok_with(
            format!("Summary email queued for {address}"),
            json!({ "queued_id": item.id }),
        ))
    }
}

fn feature_payload(feature: &Feature) -> serde_json::Value {
    serde_json::to_value(feature).unwrap_or_default()
}

fn list(snapshot: &Snapshot) -> CommandResult {
    if snapshot.features.is_empty() {
        return CommandResult::ok_with("No features registered.", json!([]));
    }
    let mut out = format!("Features ({}):", snapshot.features.len());
    for f in &snapshot.features {
        let _ = write!(
            out,
            "\n  {} {} ({}) - {}\n      id: {}",
            f.status_marker(),
            f.name,
            f.category,
            f.description,
            f.id
        );
    }
    let payload = serde_json::to_value(&snapshot.features).unwrap_or_default();
    CommandResult::ok_with(out, payload)
}

fn set_enabled(
    cmd: &ParsedCommand<'_>,
    snapshot: &Snapshot,
    store: &mut dyn StoreMutation,
    enable: bool,
) -> CommandOutcome {
    let query = cmd.rest();
    if query.is_empty() {
        return Err(CommandError::Validation(format!(
            "Usage: {} <id|name>",
            cmd.verb
        )));
    }
    let feature = snapshot
        .find_feature(&query)
        .ok_or_else(|| CommandError::NotFound(format!("Feature not found: '{query}'")))?;

    let state = if enable { "enabled" } else { "disabled" };
    if feature.enabled == enable {
        return Ok(CommandResult::ok_with(
            format!("Feature '{}' is already {state}", feature.name),
            feature_payload(feature),
        ));
    }
    let updated = store.toggle_feature(feature.id.as_str())?;
    Ok(CommandResult::ok_with(
        format!("Feature '{}' {state}", updated.name),
        feature_payload(&updated),
    ))
}

fn add(cmd: &ParsedCommand<'_>, store: &mut dyn StoreMutation) -> CommandOutcome {
    let rest = cmd.rest();
    let segments: Vec<&str> = rest.split('|').map(str::trim).collect();
    if segments.len() < 2 {
        return Err(CommandError::Validation(
            "Usage: add <name> | <description> | [category]".into(),
        ));
    }
    let (name, description) = (segments[0], segments[1]);
    if name.is_empty() || description.is_empty() {
        return Err(CommandError::Validation(
            "Feature name and description are required".into(),
        ));
    }
    let category = segments
        .get(2)
        .copied()
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY);

    let feature = store.add_feature(name, description, category)?;
    Ok(CommandResult::ok_with(
        format!("Feature '{}' added (id: {})", feature.name, feature.id),
        feature_payload(&feature),
    ))
}

fn remove(
    cmd: &ParsedCommand<'_>,
    snapshot: &Snapshot,
    store: &mut dyn StoreMutation,
) -> CommandOutcome {
    let [id] = cmd.args.as_slice() else {
        return Err(CommandError::Validation("Usage: remove <id>".into()));
    };
    let feature = snapshot
        .feature_by_id(id)
        .ok_or_else(|| CommandError::NotFound(format!("Feature not found: '{id}'")))?;
    let removed = store
        .remove_feature(feature.id.as_str())
        .ok_or_else(|| CommandError::NotFound(format!("Feature not found: '{id}'")))?;
    Ok(CommandResult::ok_with(
        format!("Feature '{}' removed", removed.name),
        feature_payload(&removed),
    ))
}
