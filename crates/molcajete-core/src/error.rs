//! Unified error handling for Molcajete Core.
//!
//! [`MolcajeteError`] is what every ingredient hook and every command returns.
//! Besides wrapping domain and application errors it carries the two control
//! signals the pipeline treats specially: user interrupts and explicit exit
//! requests.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Boxed error raised by application code inside a command.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Root error type for Molcajete Core operations.
#[derive(Debug, Error)]
pub enum MolcajeteError {
    /// The user cancelled (Ctrl-C at a prompt, closed input, ...).
    #[error("interrupted by the user")]
    Interrupted,

    /// Something asked for the process to exit with `code`.
    #[error("exit requested with status {code}")]
    ExitRequested { code: u8 },

    /// Errors from the domain layer (color, ANSI and argument model).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (pipeline and recipe misuse).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// I/O failure while a command or ingredient wrote output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything a command raised on its own.
    #[error("{0}")]
    Failed(#[source] BoxError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MolcajeteError {
    /// Wrap an arbitrary error raised by application code.
    pub fn failed(error: impl Into<BoxError>) -> Self {
        Self::Failed(error.into())
    }

    pub fn exit(code: u8) -> Self {
        Self::ExitRequested { code }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Molcajete".into(),
                "Please report it together with the output of RUST_BACKTRACE=1".into(),
            ],
            _ => Vec::new(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Interrupted | Self::ExitRequested { .. } => ErrorCategory::Control,
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Io(_) | Self::Failed(_) => ErrorCategory::Runtime,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit status this error maps to when nobody handles it.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Interrupted => 0,
            Self::ExitRequested { code } => *code,
            _ => 1,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Interrupts and exit requests; not failures at all.
    Control,
    Validation,
    NotFound,
    Configuration,
    Runtime,
    Internal,
}

/// Convenient result type alias.
pub type MolcajeteResult<T> = Result<T, MolcajeteError>;

/// Extension trait for turning foreign errors into command failures.
pub trait ErrorContext<T> {
    /// Wrap the error with a message describing what was being attempted.
    fn context(self, msg: impl Into<String>) -> MolcajeteResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> MolcajeteResult<T> {
        self.map_err(|e| {
            MolcajeteError::failed(ContextError {
                message: msg.into(),
                source: Box::new(e),
            })
        })
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
struct ContextError {
    message: String,
    #[source]
    source: BoxError,
}
