//! Unified error handling for bedrockd.
//!
//! This module provides the error hierarchy for the dispatch core: the
//! user-facing command errors, the error-kind taxonomy that per-command error
//! handlers match against, handler results, and fatal setup errors.

use crate::handlers::core::middleware::OutboundError;
use thiserror::Error;

// ============================================================================
// Error kinds (matching taxonomy)
// ============================================================================

/// Enumerated error kind used to match errors against registered handlers.
///
/// Kinds form a tree rooted at [`ErrorKind::Any`]:
///
/// ```text
/// Any
/// ├── Command
/// │   ├── BadArgument
/// │   ├── MissingArguments
/// │   ├── TooManyArguments
/// │   ├── UnknownCommand
/// │   └── MissingQuote
/// ├── Send
/// ├── Internal
/// └── Custom(name)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Any,
    Command,
    BadArgument,
    MissingArguments,
    TooManyArguments,
    UnknownCommand,
    MissingQuote,
    Send,
    Internal,
    Custom(&'static str),
}

impl ErrorKind {
    /// The direct parent kind, `None` for the root.
    pub fn parent(&self) -> Option<ErrorKind> {
        match self {
            Self::Any => None,
            Self::Command | Self::Send | Self::Internal | Self::Custom(_) => Some(Self::Any),
            Self::BadArgument
            | Self::MissingArguments
            | Self::TooManyArguments
            | Self::UnknownCommand
            | Self::MissingQuote => Some(Self::Command),
        }
    }

    /// Whether `self` is the same kind as `other` or one of its descendants.
    pub fn is_subkind_of(&self, other: ErrorKind) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Display name used in chat replies.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Any => "Error",
            Self::Command => "CommandError",
            Self::BadArgument => "BadArgumentError",
            Self::MissingArguments => "MissingArgumentsError",
            Self::TooManyArguments => "TooManyArgumentsError",
            Self::UnknownCommand => "UnknownCommandError",
            Self::MissingQuote => "MissingQuoteError",
            Self::Send => "SendError",
            Self::Internal => "InternalError",
            Self::Custom(name) => *name,
        }
    }
}

// ============================================================================
// Command Errors (user-facing)
// ============================================================================

/// Expected, user-facing failures while turning chat into a command call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("could not convert '{token}' to {expected}")]
    BadArgument { token: String, expected: String },

    #[error("argument {name} is missing")]
    MissingArguments { name: String },

    #[error("command takes {max} arguments but {given} were given")]
    TooManyArguments { max: usize, given: usize },

    #[error("command '{name}' does not exist{}", suggestion_suffix(.suggestions))]
    UnknownCommand {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("missing closing quote")]
    MissingQuote,

    /// Any other command failure, e.g. an error wrapped from a custom parser.
    #[error("{0}")]
    Generic(String),
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!("; perhaps you meant '{only}'?"),
        many => {
            let quoted: Vec<String> = many.iter().map(|s| format!("'{s}'")).collect();
            format!("; perhaps you meant one of {}?", quoted.join(", "))
        }
    }
}

impl CommandError {
    /// Kind tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadArgument { .. } => ErrorKind::BadArgument,
            Self::MissingArguments { .. } => ErrorKind::MissingArguments,
            Self::TooManyArguments { .. } => ErrorKind::TooManyArguments,
            Self::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            Self::MissingQuote => ErrorKind::MissingQuote,
            Self::Generic(_) => ErrorKind::Command,
        }
    }

    /// Chat-visible description: kind name followed by the message.
    pub fn describe(&self) -> String {
        format!("{}: {}", self.kind().name(), self)
    }
}

// ============================================================================
// Handler Errors (command/event processing)
// ============================================================================

/// Errors that can occur while running a handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("send error: {0}")]
    Send(#[from] OutboundError),

    /// A handler-defined failure, matchable through [`ErrorKind::Custom`].
    #[error("{message}")]
    Custom {
        kind: &'static str,
        message: String,
    },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HandlerError {
    /// Build a handler-defined error of the given custom kind.
    pub fn custom(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Custom {
            kind,
            message: message.into(),
        }
    }

    /// Kind tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Command(e) => e.kind(),
            Self::Send(_) => ErrorKind::Send,
            Self::Custom { kind, .. } => ErrorKind::Custom(*kind),
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Command(CommandError::BadArgument { .. }) => "bad_argument",
            Self::Command(CommandError::MissingArguments { .. }) => "missing_arguments",
            Self::Command(CommandError::TooManyArguments { .. }) => "too_many_arguments",
            Self::Command(CommandError::UnknownCommand { .. }) => "unknown_command",
            Self::Command(CommandError::MissingQuote) => "missing_quote",
            Self::Command(CommandError::Generic(_)) => "command_error",
            Self::Send(_) => "send_error",
            Self::Custom { .. } => "custom",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type for handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Setup Errors (fatal caller errors)
// ============================================================================

/// Misconfiguration detected synchronously at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("please set a command prefix before registering commands")]
    MissingPrefix,

    #[error("specify a command prefix as well when using a custom command parser")]
    ParserWithoutPrefix,

    #[error("a custom command parser is installed; commands cannot be registered")]
    ParserInstalled,

    #[error("commands are already registered; a custom command parser cannot be installed")]
    CommandsRegistered,

    #[error("command name must not be empty")]
    EmptyName,

    #[error("command must not contain whitespace ({0:?})")]
    Whitespace(String),

    #[error("command with name or alias {0} is already registered")]
    DuplicateName(String),

    #[error("invalid boolean word list: {0}")]
    InvalidWordList(String),
}
