//! Application layer errors.
//!
//! These errors describe a pipeline that was assembled wrongly: an ingredient
//! that needs something no earlier ingredient provided, or a parser result
//! that does not fit the command tree. They are developer errors.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating the pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A context entry was read before any ingredient wrote it.
    #[error("context has no {what}; {needed_by} needs an ingredient that provides it")]
    MissingContext {
        what: &'static str,
        needed_by: &'static str,
    },

    /// The parser selected a child the command tree does not have.
    #[error("parser selected sub-command #{index} at level {level}, which does not exist")]
    InvalidSelection { level: usize, index: usize },

    /// A context extension exists but holds another type.
    #[error("context extension '{key}' holds a different type")]
    ExtensionType { key: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingContext { what, needed_by } => vec![
                format!("{needed_by} reads the {what} from the context"),
                "Check the ingredient order of your recipe".into(),
            ],
            Self::InvalidSelection { .. } => vec![
                "The parser and the command tree disagree".into(),
                "Build the parser from the same tree the dispatcher walks".into(),
            ],
            Self::ExtensionType { key } => vec![format!(
                "Two ingredients store different types under '{key}'; namespace the key"
            )],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingContext { .. } | Self::ExtensionType { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidSelection { .. } => ErrorCategory::Internal,
        }
    }
}
