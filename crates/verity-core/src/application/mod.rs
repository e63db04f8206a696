//! Application layer for Verity.
//!
//! This layer contains:
//! - **Services**: the validation engine (`Validator`)
//! - **Constraint adapters**: descriptor → engine check + error map
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: engine faults (`EngineError`)
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those are declared by value objects in
//! `crate::domain`.

pub mod constraint_adapters;
pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{FieldErrors, ValidationOptions, ValidationReport, Validator};

// Re-export port traits (for adapter implementation)
pub use ports::{CheckingEngine, FileInspector};

pub use error::EngineError;
