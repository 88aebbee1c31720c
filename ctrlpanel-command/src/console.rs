use crate::interpreter::CommandInterpreter;
use crate::result::CommandResult;
use ctrlpanel_model::LogKind;
use ctrlpanel_store::{EntityStore, SharedStore};
use tracing::debug;

/// The terminal tab's command runner.
///
/// Runs the interpreter against a fresh snapshot, then records the
/// invocation in the command log, tagged by outcome.
#[derive(Debug, Clone, Default)]
pub struct Console {
    interpreter: CommandInterpreter,
}

impl Console {
    pub fn new(interpreter: CommandInterpreter) -> Self {
        Self { interpreter }
    }

    pub fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    pub fn run(&self, store: &mut EntityStore, input: &str) -> CommandResult {
        let snapshot = store.snapshot();
        let result = self.interpreter.execute(input, &snapshot, store);
        let kind = if result.success {
            LogKind::Success
        } else {
            LogKind::Error
        };
        debug!(command = input.trim(), success = result.success, "command executed");
        store.append_command_log(input.trim(), &result.message, kind);
        result
    }

    /// Runs a command while holding the store's mutation lock, so the
    /// snapshot, the mutation and the log entry happen atomically.
    pub fn run_shared(&self, store: &SharedStore, input: &str) -> CommandResult {
        store.with(|s| self.run(s, input))
    }
}
