/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the capture form and the database layer.

use std::path::PathBuf;

/// Everything the form has collected so far
///
/// Lives as long as the form does. Only the input and capture handlers
/// write to it; saving reads it but never clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureSession {
    /// Name as typed by the operator
    pub user_name: String,
    /// User ID as typed by the operator
    pub user_id: String,
    /// Where the last captured photo was written (None until a capture succeeds)
    pub photo_path: Option<PathBuf>,
    /// Where the last fingerprint image was written (None until a scan succeeds)
    pub fingerprint_path: Option<PathBuf>,
}

impl CaptureSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the row to insert, or None if any of the four fields is empty.
    ///
    /// Presence only: the paths are not checked against the file system.
    pub fn to_record(&self) -> Option<BiometricRecord> {
        if self.user_name.is_empty() || self.user_id.is_empty() {
            return None;
        }

        let photo_path = non_empty_path(self.photo_path.as_ref())?;
        let fingerprint_path = non_empty_path(self.fingerprint_path.as_ref())?;

        Some(BiometricRecord {
            user_id: self.user_id.clone(),
            name: self.user_name.clone(),
            photo_path,
            fingerprint_path,
        })
    }
}

fn non_empty_path(path: Option<&PathBuf>) -> Option<String> {
    let path = path?.to_string_lossy().to_string();
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// One row of the `users` table
///
/// Paths are stored as plain strings, never the image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiometricRecord {
    pub user_id: String,
    pub name: String,
    pub photo_path: String,
    pub fingerprint_path: String,
}
