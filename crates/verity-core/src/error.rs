//! Unified error handling for Verity Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.
//!
//! None of these are validation outcomes. A value failing its constraints is
//! reported as `ErrorCode`s in an `Ok`; an `Err` means the run itself could
//! not be trusted.

use thiserror::Error;

use crate::application::EngineError;
use crate::domain::DomainError;

/// Root error type for Verity Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VerityError {
    /// A descriptor could not be built or an identifier is unknown.
    #[error("Descriptor error: {0}")]
    Domain(#[from] DomainError),

    /// The engine could not complete a validation run.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl VerityError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Engine(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Descriptor => ErrorCategory::Descriptor,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Engine(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Descriptor,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type VerityResult<T> = Result<T, VerityError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::EngineCode;
    use crate::domain::ConstraintKind;

    #[test]
    fn unmapped_violation_is_internal() {
        let err: VerityError = EngineError::UnmappedViolation {
            kind: ConstraintKind::File,
            code: EngineCode::CorruptedImage,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("corrupted-image"));
    }

    #[test]
    fn adapter_gaps_are_internal() {
        let faults: [VerityError; 2] = [
            EngineError::UnregisteredKind {
                kind: ConstraintKind::Uuid,
            }
            .into(),
            EngineError::UnmappedViolation {
                kind: ConstraintKind::Email,
                code: EngineCode::TooLong,
            }
            .into(),
        ];
        for err in faults {
            assert_eq!(err.category(), ErrorCategory::Internal);
            assert!(!err.suggestions().is_empty());
        }
    }

    #[test]
    fn descriptor_errors_keep_their_suggestions() {
        let err: VerityError = DomainError::UnknownParam {
            kind: ConstraintKind::Email,
            param: "mode".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Descriptor);
        assert!(err.suggestions()[0].contains("mode"));
    }
}
