use crate::error::CommandError;
use std::fmt;

/// Every command the interpreter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Help,
    List,
    Enable,
    Disable,
    Add,
    Remove,
    Status,
    ClearLogs,
    ClearGps,
    SyncEmail,
    Version,
}

impl Verb {
    pub const ALL: [Self; 11] = [
        Self::Help,
        Self::List,
        Self::Enable,
        Self::Disable,
        Self::Add,
        Self::Remove,
        Self::Status,
        Self::ClearLogs,
        Self::ClearGps,
        Self::SyncEmail,
        Self::Version,
    ];

    /// The verb as typed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::List => "list",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Status => "status",
            Self::ClearLogs => "clear-logs",
            Self::ClearGps => "clear-gps",
            Self::SyncEmail => "sync-email",
            Self::Version => "version",
        }
    }

    /// Matches an already lower-cased token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == token)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub verb: Verb,
    pub args: Vec<&'a str>,
}

impl ParsedCommand<'_> {
    /// Arguments re-joined with single spaces.
    pub fn rest(&self) -> String {
        self.args.join(" ")
    }
}

/// Splits a command line into verb and arguments.
pub fn parse(input: &str) -> Result<ParsedCommand<'_>, CommandError> {
    let mut tokens = input.split_whitespace();
    let first = tokens.next().ok_or(CommandError::Empty)?;
    let token = first.to_lowercase();
    let verb = Verb::from_token(&token).ok_or(CommandError::UnknownCommand(token))?;
    Ok(ParsedCommand {
        verb,
        args: tokens.collect(),
    })
}
