//! Application services - orchestrate use cases.
//!
//! The only use case here is "validate these values": the [`Validator`]
//! coordinates descriptors, adapters and the checking-engine port.

pub mod validation_service;

pub use validation_service::{FieldErrors, ValidationOptions, ValidationReport, Validator};
