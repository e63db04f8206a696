//! Application layer errors.
//!
//! These are engine faults: something prevented a validation run from
//! producing a trustworthy result. Validation outcomes are never errors;
//! they are `ErrorCode` lists returned as data.

use thiserror::Error;

use crate::application::ports::{CheckError, EngineCode};
use crate::domain::ConstraintKind;
use crate::error::ErrorCategory;

/// Errors that abort a validation run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The engine reported an identifier the adapter's error map lacks.
    #[error("engine reported '{code}' for '{kind}', which its error map does not translate")]
    UnmappedViolation {
        kind: ConstraintKind,
        code: EngineCode,
    },

    /// No adapter is registered for a kind.
    #[error("no adapter registered for '{kind}'")]
    UnregisteredKind { kind: ConstraintKind },

    /// The engine could not run the check for a descriptor.
    #[error("'{kind}' could not be checked: {source}")]
    CheckFailed {
        kind: ConstraintKind,
        #[source]
        source: CheckError,
    },
}

impl EngineError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnmappedViolation { kind, .. } | Self::UnregisteredKind { kind } => vec![
                format!("The adapter for '{kind}' is incomplete"),
                "This is a bug in Verity, please report it".into(),
            ],
            Self::CheckFailed {
                kind,
                source: CheckError::UnexpectedValue { expected, .. },
            } => vec![
                format!("'{kind}' only applies to {expected} values"),
                "Remove the descriptor or change the value's type".into(),
            ],
            Self::CheckFailed { kind, .. } => vec![
                format!("Check the parameters declared for '{kind}'"),
                "Try: verity kinds".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnmappedViolation { .. } | Self::UnregisteredKind { .. } => {
                ErrorCategory::Internal
            }
            Self::CheckFailed { .. } => ErrorCategory::Descriptor,
        }
    }
}
