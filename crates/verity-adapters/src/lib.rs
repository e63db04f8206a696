//! Infrastructure adapters for Verity.
//!
//! This crate implements the ports defined in `verity-core::application::ports`.
//! It contains the checking engine and every piece of file I/O.

pub mod checker;
pub mod files;

// Re-export commonly used adapters
pub use checker::NativeChecker;
pub use files::{LocalFileInspector, MemoryFile, MemoryFileInspector};
