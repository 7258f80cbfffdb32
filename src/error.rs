/// Error types for the capture adapters, the record store and configuration
///
/// Each external system gets its own enum so the controller can tell
/// "device missing" apart from "capture came back empty" apart from
/// "database refused the row".

use thiserror::Error;

/// Failures of the webcam adapter
#[derive(Debug, Error)]
pub enum CameraError {
    /// The camera could not be opened (missing, busy, no permission)
    #[error("camera unavailable: {0}")]
    Unavailable(String),

    /// The camera opened but no usable frame came back
    #[error("failed to read frame: {0}")]
    ReadFailed(String),

    /// The frame could not be encoded into the chosen file
    #[error("failed to write photo: {0}")]
    Encode(#[from] image::ImageError),
}

/// Failures reported by the fingerprint scanner driver
#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("fingerprint scanner unavailable: {0}")]
    Unavailable(String),

    /// Error code and message as returned by the vendor library
    #[error("{message} (code {code})")]
    Driver { code: i32, message: String },
}

/// Failures of the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while reading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while building a preview from an image file
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to decode preview: {0}")]
    Decode(#[from] image::ImageError),
}
