//! In-memory file inspector for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use verity_core::application::ports::{DimensionError, Dimensions, FileInspector};

/// Metadata of one in-memory file.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryFile {
    size: u64,
    readable: bool,
    mime_type: Option<String>,
    dimensions: Result<Dimensions, DimensionError>,
}

impl MemoryFile {
    /// A readable file of `size` bytes with no known type.
    pub fn new(size: u64) -> Self {
        Self {
            size,
            readable: true,
            mime_type: None,
            dimensions: Err(DimensionError::Undetectable),
        }
    }

    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Ok(Dimensions::new(width, height));
        self
    }

    /// Image data that cannot be decoded.
    pub fn corrupted(mut self) -> Self {
        self.dimensions = Err(DimensionError::Corrupted);
        self
    }

    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// In-memory file inspector for testing.
#[derive(Debug, Clone)]
pub struct MemoryFileInspector {
    inner: Arc<RwLock<MemoryFileInspectorInner>>,
}

#[derive(Debug, Default)]
struct MemoryFileInspectorInner {
    files: HashMap<PathBuf, MemoryFile>,
}

impl MemoryFileInspector {
    /// Create a new empty inspector.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFileInspectorInner::default())),
        }
    }

    /// Register a file, replacing any earlier entry at `path`.
    pub fn insert(&self, path: impl Into<PathBuf>, file: MemoryFile) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.insert(path.into(), file);
        }
    }

    pub fn remove(&self, path: &Path) -> Option<MemoryFile> {
        self.inner.write().ok()?.files.remove(path)
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
        }
    }

    fn get(&self, path: &Path) -> Option<MemoryFile> {
        self.inner.read().ok()?.files.get(path).cloned()
    }
}

impl Default for MemoryFileInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileInspector for MemoryFileInspector {
    fn exists(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    fn is_readable(&self, path: &Path) -> bool {
        self.get(path).is_some_and(|f| f.readable)
    }

    fn size(&self, path: &Path) -> Option<u64> {
        self.get(path).filter(|f| f.readable).map(|f| f.size)
    }

    fn mime_type(&self, path: &Path) -> Option<String> {
        self.get(path).and_then(|f| f.mime_type)
    }

    fn dimensions(&self, path: &Path) -> Result<Dimensions, DimensionError> {
        self.get(path)
            .map_or(Err(DimensionError::Undetectable), |f| f.dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_files_expose_their_metadata() {
        let files = MemoryFileInspector::new();
        files.insert(
            "a.png",
            MemoryFile::new(42).mime_type("image/png").dimensions(3, 4),
        );

        let path = Path::new("a.png");
        assert!(files.exists(path));
        assert_eq!(files.size(path), Some(42));
        assert_eq!(files.mime_type(path).as_deref(), Some("image/png"));
        assert_eq!(files.dimensions(path), Ok(Dimensions::new(3, 4)));
    }

    #[test]
    fn clones_share_state() {
        let files = MemoryFileInspector::new();
        let view = files.clone();
        files.insert("x", MemoryFile::new(1));
        assert!(view.exists(Path::new("x")));

        view.clear();
        assert!(!files.exists(Path::new("x")));
    }

    #[test]
    fn unreadable_files_hide_their_size() {
        let files = MemoryFileInspector::new();
        files.insert("locked", MemoryFile::new(9).unreadable());
        assert!(files.exists(Path::new("locked")));
        assert!(!files.is_readable(Path::new("locked")));
        assert_eq!(files.size(Path::new("locked")), None);
    }
}
