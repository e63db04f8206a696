//! File inspector adapters.

mod local;
mod memory;

pub use local::LocalFileInspector;
pub use memory::{MemoryFile, MemoryFileInspector};
