// ============================================================================
// domain/error.rs - DESCRIPTOR FAULTS
// ============================================================================

use thiserror::Error;

use crate::domain::constraint::ConstraintKind;

/// Root domain error type.
///
/// These are programmer or configuration faults: a descriptor that cannot be
/// built, or an identifier outside a closed vocabulary. Validation outcomes
/// are never represented here; they are [`crate::domain::ErrorCode`] values.
///
/// All errors are:
/// - Cloneable (they travel inside `VerityError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Descriptor shape
    // ========================================================================
    #[error("malformed '{kind}' descriptor: {reason}")]
    MalformedDescriptor { kind: ConstraintKind, reason: String },

    #[error("'{kind}' does not accept parameter '{param}'")]
    UnknownParam { kind: ConstraintKind, param: String },

    #[error("'{kind}' requires parameter '{param}'")]
    MissingParam {
        kind: ConstraintKind,
        param: &'static str,
    },

    #[error("parameter '{param}' of '{kind}' must be {expected}")]
    InvalidParam {
        kind: ConstraintKind,
        param: &'static str,
        expected: &'static str,
    },

    // ========================================================================
    // Closed vocabularies
    // ========================================================================
    #[error("unknown {what}: {value}")]
    UnknownIdentifier { what: &'static str, value: String },
}

impl DomainError {
    pub(crate) fn malformed(kind: ConstraintKind, reason: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            kind,
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedDescriptor { kind, .. } | Self::InvalidParam { kind, .. } => vec![
                format!("Check the parameters declared for '{kind}'"),
                "Try: verity kinds to list every constraint and its parameters".into(),
            ],
            Self::UnknownParam { kind, param } => vec![
                format!("Remove '{param}' from the '{kind}' descriptor"),
                "Try: verity kinds to list accepted parameters".into(),
            ],
            Self::MissingParam { kind, param } => {
                vec![format!("Add '{param}' to the '{kind}' descriptor")]
            }
            Self::UnknownIdentifier { what, .. } => match *what {
                "constraint kind" => vec!["Try: verity kinds".into()],
                "error code" | "error family" => vec!["Try: verity codes".into()],
                _ => vec!["See documentation for more details".into()],
            },
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedDescriptor { .. }
            | Self::UnknownParam { .. }
            | Self::MissingParam { .. }
            | Self::InvalidParam { .. } => ErrorCategory::Descriptor,
            Self::UnknownIdentifier { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Descriptor,
    NotFound,
}
