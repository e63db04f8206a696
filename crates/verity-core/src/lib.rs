//! Verity Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the Verity
//! value-validation engine, following hexagonal (ports and adapters)
//! architecture. Value objects declare engine-agnostic constraints; the
//! engine runs them through a pluggable checker and answers with a closed
//! vocabulary of domain error codes.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           verity-cli (CLI)              │
//! │     (Drives the Validator service)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Validator + Constraint Adapters    │
//! │  descriptor → check + error map → code  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │    (CheckingEngine, FileInspector)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     verity-adapters (Infrastructure)    │
//! │  (NativeChecker, LocalFileInspector)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ErrorCode, Constraint, Constrainable)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use verity_core::prelude::*;
//!
//! // 1. A value object declares its rules
//! let email = Email::new(Some("not-an-email".to_owned()));
//!
//! // 2. The validator runs them through an injected engine
//! let validator = Validator::new(Box::new(engine));
//! let codes = validator.validate_object(&email)?;
//! assert_eq!(codes, [ErrorCode::Email]);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CheckingEngine, FieldErrors, FileInspector, ValidationOptions, ValidationReport,
        Validator,
    };
    pub use crate::domain::{
        Child, Children, Constrainable, ConstrainableValue, Constraint, ConstraintKind,
        ConstraintSet, ConstraintSetBuilder, Email, ErrorCode, FileRef, RawValue,
    };
    pub use crate::error::{VerityError, VerityResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
