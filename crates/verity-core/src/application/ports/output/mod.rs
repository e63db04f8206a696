//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `verity-adapters` crate provides implementations.

use std::path::Path;

use crate::application::ports::checks::{Check, CheckError, DimensionError, Dimensions, Violation};
use crate::domain::RawValue;

/// Port for the underlying checking engine.
///
/// Implemented by:
/// - `verity_adapters::checker::NativeChecker` (production)
/// - `MockCheckingEngine` (unit tests, generated by `mockall`)
///
/// ## Contract
///
/// - Violations come back in the engine's native order
/// - A value the check considers valid yields an empty list
/// - `Err` is reserved for checks that cannot run at all (wrong value
///   type, unusable parameters); it is never a validation outcome
#[cfg_attr(test, mockall::automock)]
pub trait CheckingEngine: Send + Sync {
    fn check(&self, check: &Check, value: &RawValue) -> Result<Vec<Violation>, CheckError>;
}

/// Port for file metadata, used by file and image checks.
///
/// Implemented by:
/// - `verity_adapters::files::LocalFileInspector` (std::fs)
/// - `verity_adapters::files::MemoryFileInspector` (testing)
///
/// Lookups never fail loudly: a missing answer is `false` / `None` and the
/// engine turns it into the corresponding violation.
pub trait FileInspector: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_readable(&self, path: &Path) -> bool;

    /// Size in bytes.
    fn size(&self, path: &Path) -> Option<u64>;

    /// Detected or guessed MIME type, e.g. `image/png`.
    fn mime_type(&self, path: &Path) -> Option<String>;

    fn dimensions(&self, path: &Path) -> Result<Dimensions, DimensionError>;
}
