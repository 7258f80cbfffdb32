/// Webcam still capture
///
/// Opens the camera, grabs exactly one frame and closes it again. The
/// device is never held between captures.

use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use std::path::Path;

use crate::error::CameraError;

/// Anything that can produce a single RGB frame on demand
pub trait CameraSource {
    /// Blocks until one frame has been read. No timeout.
    fn grab_frame(&mut self) -> Result<RgbImage, CameraError>;
}

/// Camera backed by the platform's native capture API
pub struct NokhwaCamera {
    index: u32,
}

impl NokhwaCamera {
    pub fn new(index: u32) -> Self {
        Self { index }
    }
}

impl CameraSource for NokhwaCamera {
    fn grab_frame(&mut self) -> Result<RgbImage, CameraError> {
        let format =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(self.index), format)
            .map_err(|e| CameraError::Unavailable(e.to_string()))?;

        // stream stops before decoding
        let buffer = with_stream(&mut camera, |camera| {
            camera
                .frame()
                .map_err(|e| CameraError::ReadFailed(e.to_string()))
        })?;

        let resolution = buffer.resolution();
        let (width, height) = (resolution.width(), resolution.height());
        if width == 0 || height == 0 {
            return Err(CameraError::ReadFailed("empty frame".to_string()));
        }

        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        buffer
            .decode_image_to_buffer::<RgbFormat>(&mut pixels)
            .map_err(|e| CameraError::ReadFailed(e.to_string()))?;

        log::info!(
            "📷 Grabbed {}x{} frame from camera {}",
            width,
            height,
            self.index
        );

        RgbImage::from_raw(width, height, pixels)
            .ok_or_else(|| CameraError::ReadFailed("frame size mismatch".to_string()))
    }
}

/// Start/stop control of a device stream
trait StreamControl {
    fn start(&mut self) -> Result<(), CameraError>;
    fn stop(&mut self) -> Result<(), CameraError>;
}

impl StreamControl for Camera {
    fn start(&mut self) -> Result<(), CameraError> {
        self.open_stream()
            .map_err(|e| CameraError::Unavailable(e.to_string()))
    }

    fn stop(&mut self) -> Result<(), CameraError> {
        self.stop_stream()
            .map_err(|e| CameraError::Unavailable(e.to_string()))
    }
}

/// Run `read` on a started stream. The stream is stopped afterwards
/// whether the read succeeded or not.
fn with_stream<S, T>(
    source: &mut S,
    read: impl FnOnce(&mut S) -> Result<T, CameraError>,
) -> Result<T, CameraError>
where
    S: StreamControl,
{
    let mut stream = OpenStream::start(source)?;
    read(&mut *stream.source)
}

/// An open stream, stopped on drop
struct OpenStream<'a, S: StreamControl> {
    source: &'a mut S,
}

impl<'a, S: StreamControl> OpenStream<'a, S> {
    fn start(source: &'a mut S) -> Result<Self, CameraError> {
        source.start()?;
        Ok(Self { source })
    }
}

impl<S: StreamControl> Drop for OpenStream<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.source.stop() {
            log::warn!("⚠️  Failed to release camera: {}", e);
        }
    }
}

/// Write a frame to `path`, encoded according to the path's extension
pub fn write_frame(frame: &RgbImage, path: &Path) -> Result<(), CameraError> {
    frame.save(path)?;
    log::info!("💾 Photo written to {}", path.display());
    Ok(())
}
