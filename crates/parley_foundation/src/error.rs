//! Error types for the Parley system.
//!
//! Uses `thiserror` for the categorized error kinds. The outer [`Error`]
//! adds optional diagnostic context and forwards the source chain of its
//! kind, so a failed handler's own error stays reachable.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::types::Type;

/// Error type returned by command handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Parley operations.
#[derive(Debug)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the script line this error occurred on, keeping any
    /// existing context.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.context = Some(self.context.take().unwrap_or_default().with_line(line));
        self
    }

    /// Creates a conversion error for a raw value and target type.
    #[must_use]
    pub fn conversion(value: impl Into<String>, target: Type) -> Self {
        Self::new(ErrorKind::Conversion {
            value: value.into(),
            target,
            reason: None,
        })
    }

    /// Creates a conversion error carrying the parser's reason.
    #[must_use]
    pub fn conversion_because(
        value: impl Into<String>,
        target: Type,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Conversion {
            value: value.into(),
            target,
            reason: Some(reason.into()),
        })
    }

    /// Creates a converter contract violation error.
    #[must_use]
    pub fn converter_contract(converter: impl Into<String>, target: Type, actual: Type) -> Self {
        Self::new(ErrorKind::ConverterContract {
            converter: converter.into(),
            target,
            actual,
        })
    }

    /// Creates a missing argument error.
    #[must_use]
    pub fn missing_argument(position: usize, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingArgument {
            position,
            name: name.into(),
        })
    }

    /// Wraps a conversion failure with the offending token text.
    #[must_use]
    pub fn invalid_argument(token: impl Into<String>, cause: Error) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            token: token.into(),
            source: Box::new(cause),
        })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: String, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates a name conflict error.
    #[must_use]
    pub fn name_conflict(name: impl Into<String>, existing: impl Into<String>) -> Self {
        Self::new(ErrorKind::NameConflict {
            name: name.into(),
            existing: existing.into(),
        })
    }

    /// Creates an invalid handler signature error.
    #[must_use]
    pub fn invalid_signature(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSignature {
            command: command.into(),
            reason: reason.into(),
        })
    }

    /// Creates an unknown command error.
    #[must_use]
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCommand(name.into()))
    }

    /// Creates an invocation error that keeps the handler's error as its source.
    #[must_use]
    pub fn invocation(command: impl Into<String>, source: HandlerError) -> Self {
        Self::new(ErrorKind::Invocation {
            command: command.into(),
            source,
        })
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Returns the message callers saw before invocation errors kept their cause.
    ///
    /// For invocation failures this is only the handler error's own message;
    /// every other kind renders as its `Display` text.
    #[must_use]
    pub fn legacy_message(&self) -> String {
        match &self.kind {
            ErrorKind::Invocation { source, .. } => source.to_string(),
            kind => kind.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No converter or elementary fallback could produce the target type.
    #[error("cannot convert '{value}' to {target}{}", reason_suffix(.reason))]
    Conversion {
        /// The raw text that failed to convert.
        value: String,
        /// The type that was requested.
        target: Type,
        /// Why the elementary parse failed, if known.
        reason: Option<String>,
    },

    /// A converter returned a value that is not assignable to the target type.
    #[error("converter '{converter}' returned {actual}, which is not assignable to {target}")]
    ConverterContract {
        /// Name of the offending converter.
        converter: String,
        /// The type that was requested.
        target: Type,
        /// The type the converter actually produced.
        actual: Type,
    },

    /// A required parameter had no token.
    #[error("no value provided for parameter {position} ({name})")]
    MissingArgument {
        /// Zero-based parameter position.
        position: usize,
        /// Parameter name.
        name: String,
    },

    /// A token failed to convert for its parameter.
    #[error("invalid argument '{token}': {source}")]
    InvalidArgument {
        /// The offending token text.
        token: String,
        /// The underlying conversion error.
        #[source]
        source: Box<Error>,
    },

    /// Wrong number of arguments to a command.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Description of expected arity.
        expected: String,
        /// Actual number of arguments.
        actual: usize,
    },

    /// A command name or alias collides with an existing registration.
    #[error("command name '{name}' is already registered (by '{existing}')")]
    NameConflict {
        /// The colliding name or alias.
        name: String,
        /// Canonical name of the command that already owns it.
        existing: String,
    },

    /// A handler method's declared signature is unusable.
    #[error("invalid signature for command '{command}': {reason}")]
    InvalidSignature {
        /// The command being registered.
        command: String,
        /// What is wrong with the signature.
        reason: String,
    },

    /// No command is registered under the given name or alias.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The handler itself failed.
    #[error("command '{command}' failed: {source}")]
    Invocation {
        /// Canonical name of the command.
        command: String,
        /// The handler's error.
        #[source]
        source: HandlerError,
    },

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_ref().map(|r| format!(": {r}")).unwrap_or_default()
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The command being processed.
    pub command: Option<String>,
    /// The token text involved.
    pub token: Option<String>,
    /// Character offset of the token in its source line.
    pub offset: Option<usize>,
    /// Line number in a script, when running in batch mode.
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command name.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Sets the token text and offset.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, offset: usize) -> Self {
        self.token = Some(token.into());
        self.offset = Some(offset);
        self
    }

    /// Sets the script line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(line) = self.line {
            write!(f, "line {line}")?;
            sep = ", ";
        }
        if let Some(command) = &self.command {
            write!(f, "{sep}in {command}")?;
            sep = ", ";
        }
        if let (Some(token), Some(offset)) = (&self.token, self.offset) {
            write!(f, "{sep}at '{token}' (offset {offset})")?;
        }
        Ok(())
    }
}
