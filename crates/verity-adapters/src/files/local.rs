//! Local file inspector using std::fs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use imagesize::{ImageError, ImageType};
use tracing::debug;
use verity_core::application::ports::{DimensionError, Dimensions, FileInspector};

/// Bytes read to sniff the content type.
const HEADER_LEN: u64 = 32;

/// Production file inspector reading the local filesystem.
#[derive(Debug, Clone, Copy)]
pub struct LocalFileInspector;

impl LocalFileInspector {
    /// Create a new local file inspector.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileInspector for LocalFileInspector {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_readable(&self, path: &Path) -> bool {
        File::open(path).is_ok()
    }

    fn size(&self, path: &Path) -> Option<u64> {
        std::fs::metadata(path).ok().map(|m| m.len())
    }

    /// Content sniffing for the common image formats, then the extension.
    fn mime_type(&self, path: &Path) -> Option<String> {
        sniff(path)
            .or_else(|| mime_guess::from_path(path).first_raw())
            .map(str::to_owned)
    }

    fn dimensions(&self, path: &Path) -> Result<Dimensions, DimensionError> {
        let size = imagesize::size(path).map_err(|e| {
            debug!(path = %path.display(), error = %e, "image size not detected");
            match e {
                ImageError::CorruptedImage => DimensionError::Corrupted,
                _ => DimensionError::Undetectable,
            }
        })?;
        let width = u32::try_from(size.width).map_err(|_| DimensionError::Undetectable)?;
        let height = u32::try_from(size.height).map_err(|_| DimensionError::Undetectable)?;
        Ok(Dimensions::new(width, height))
    }
}

fn sniff(path: &Path) -> Option<&'static str> {
    let mut header = Vec::new();
    File::open(path)
        .ok()?
        .take(HEADER_LEN)
        .read_to_end(&mut header)
        .ok()?;

    let mime = match imagesize::image_type(&header).ok()? {
        ImageType::Png => "image/png",
        ImageType::Jpeg => "image/jpeg",
        ImageType::Gif => "image/gif",
        ImageType::Webp => "image/webp",
        ImageType::Bmp => "image/bmp",
        ImageType::Tiff => "image/tiff",
        ImageType::Ico => "image/vnd.microsoft.icon",
        _ => return None,
    };
    Some(mime)
}
