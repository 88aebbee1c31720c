//! Command interpreter for the control panel.
//!
//! Turns one line of text into at most one store mutation and a structured
//! [`CommandResult`]. The interpreter is stateless: it reads an owned
//! [`Snapshot`](ctrlpanel_model::Snapshot) and writes through a
//! [`StoreMutation`] handle, so it can be driven headlessly with a fake.
//!
//! Recording the invocation in the command log is the caller's job;
//! [`Console`] is the caller the presentation layer uses.
//!
//! # Protocol
//!
//! Input is split on whitespace. The first token, lower-cased, selects a
//! [`Verb`]; the rest are positional arguments, re-joined with single
//! spaces for verbs that take free text.

mod console;
mod error;
mod interpreter;
mod mutation;
mod result;
mod summary;
mod verb;

pub use console::Console;
pub use error::CommandError;
pub use interpreter::{CommandInterpreter, HELP_TEXT, InterpreterConfig};
pub use mutation::StoreMutation;
pub use result::CommandResult;
pub use summary::{summary_body, summary_subject};
pub use verb::{ParsedCommand, Verb, parse};
