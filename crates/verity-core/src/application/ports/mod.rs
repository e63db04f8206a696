//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `verity-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CheckingEngine`: executes one concrete check against a raw value
//!   - `FileInspector`: file metadata used by file and image checks
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The `Validator` service; the CLI is its only in-tree caller)
//!
//! [`checks`] holds the data exchanged across the engine port: the concrete
//! check language and the engine's closed violation identifiers.

pub mod checks;
pub mod output;

pub use checks::{Check, CheckError, CompareOp, DimensionError, Dimensions, EngineCode, Violation};
pub use output::{CheckingEngine, FileInspector};

#[cfg(test)]
pub use output::MockCheckingEngine;
