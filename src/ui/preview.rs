use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

use crate::error::PreviewError;

/// A decoded image scaled to fit a square preview pane
#[derive(Debug, Clone)]
pub struct PreviewImage {
    /// File the preview was decoded from
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    handle: Handle,
}

impl PreviewImage {
    /// Decode `path` and scale it to fit within `size`×`size`, keeping the
    /// aspect ratio. Always reads the file fresh, so a file that was just
    /// overwritten shows its new content.
    pub fn load(path: &Path, size: u32) -> Result<Self, PreviewError> {
        let decoded = image::open(path)?;
        let fitted = decoded.resize(size, size, FilterType::Lanczos3).to_rgba8();
        let (width, height) = fitted.dimensions();

        Ok(PreviewImage {
            source: path.to_path_buf(),
            width,
            height,
            handle: Handle::from_rgba(width, height, fitted.into_raw()),
        })
    }

    /// Image handle for the preview widget
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }
}
