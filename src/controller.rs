/// The capture form, independent of any UI toolkit
///
/// Owns the session and the three adapters. Each public handler is one
/// user action: it runs to completion (blocking on the device or the
/// database) and leaves its outcome in `status`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::capture::camera::{self, CameraSource};
use crate::capture::fingerprint::{self, FingerprintScanner};
use crate::error::StoreError;
use crate::state::config::AppConfig;
use crate::state::data::CaptureSession;
use crate::state::store::RecordStore;
use crate::ui::preview::PreviewImage;

/// Questions the form needs the user to answer
pub trait Prompter {
    /// Where to save the captured photo. None = cancelled.
    fn choose_photo_destination(&mut self) -> Option<PathBuf>;

    /// Ask before inserting the record
    fn confirm_save(&mut self) -> bool;
}

/// Outcome of the most recent action, as shown in the status label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    PhotoCaptured,
    PhotoCaptureFailed,
    FingerprintCaptured,
    FingerprintCaptureFailed,
    MissingFields,
    Saved,
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Status: Ready"),
            Status::PhotoCaptured => write!(f, "Status: Photo Captured Successfully"),
            Status::PhotoCaptureFailed => write!(f, "Status: Photo Capture Failed"),
            Status::FingerprintCaptured => write!(f, "Status: Fingerprint Captured Successfully"),
            Status::FingerprintCaptureFailed => write!(f, "Status: Fingerprint Capture Failed"),
            Status::MissingFields => write!(f, "Status: Please fill all fields and capture data."),
            Status::Saved => write!(f, "Status: Data Saved Successfully"),
            Status::Error(message) => write!(f, "Status: Error - {}", message),
        }
    }
}

/// Where the form stands. Photo and fingerprint are captured independently,
/// in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    PhotoCaptured,
    FingerprintCaptured,
    /// Both captures present
    ReadyToSave,
    /// Last action was a successful save; the form keeps its data
    Saved,
}

/// What a save attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A field was empty; nothing was asked or written
    Incomplete,
    /// User said no
    Declined,
    /// Row inserted with this id
    Saved(i64),
}

pub struct CaptureForm {
    session: CaptureSession,
    status: Status,
    saved: bool,
    photo_preview: Option<PreviewImage>,
    fingerprint_preview: Option<PreviewImage>,
    camera: Box<dyn CameraSource>,
    scanner: Box<dyn FingerprintScanner>,
    store: Box<dyn RecordStore>,
    prompter: Box<dyn Prompter>,
    fingerprint_path: PathBuf,
    preview_size: u32,
}

impl CaptureForm {
    pub fn new(
        camera: Box<dyn CameraSource>,
        scanner: Box<dyn FingerprintScanner>,
        store: Box<dyn RecordStore>,
        prompter: Box<dyn Prompter>,
        config: &AppConfig,
    ) -> Self {
        Self {
            session: CaptureSession::new(),
            status: Status::Ready,
            saved: false,
            photo_preview: None,
            fingerprint_preview: None,
            camera,
            scanner,
            store,
            prompter,
            fingerprint_path: config.fingerprint_path.clone(),
            preview_size: config.preview_size,
        }
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn photo_preview(&self) -> Option<&PreviewImage> {
        self.photo_preview.as_ref()
    }

    pub fn fingerprint_preview(&self) -> Option<&PreviewImage> {
        self.fingerprint_preview.as_ref()
    }

    pub fn preview_size(&self) -> u32 {
        self.preview_size
    }

    pub fn stage(&self) -> Stage {
        if self.saved {
            return Stage::Saved;
        }

        match (
            self.session.photo_path.is_some(),
            self.session.fingerprint_path.is_some(),
        ) {
            (false, false) => Stage::Idle,
            (true, false) => Stage::PhotoCaptured,
            (false, true) => Stage::FingerprintCaptured,
            (true, true) => Stage::ReadyToSave,
        }
    }

    pub fn set_user_name(&mut self, name: String) {
        self.session.user_name = name;
        self.saved = false;
    }

    pub fn set_user_id(&mut self, user_id: String) {
        self.session.user_id = user_id;
        self.saved = false;
    }

    /// Grab one frame, ask where to put it, write it there.
    ///
    /// Cancelling the destination prompt leaves everything as it was,
    /// status included.
    pub fn capture_photo(&mut self) {
        let frame = match self.camera.grab_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("❌ Photo capture failed: {}", e);
                self.status = Status::PhotoCaptureFailed;
                return;
            }
        };

        let Some(path) = self.prompter.choose_photo_destination() else {
            log::info!("Photo save cancelled");
            return;
        };

        if let Err(e) = camera::write_frame(&frame, &path) {
            log::error!("❌ {}", e);
            self.status = Status::Error(e.to_string());
            return;
        }

        self.photo_preview = self.load_preview(&path);
        self.session.photo_path = Some(path);
        self.saved = false;
        self.status = Status::PhotoCaptured;
    }

    /// Run one auto-capture and write the image to the fingerprint file.
    pub fn scan_fingerprint(&mut self) {
        let bytes = match self.scanner.auto_capture() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("❌ Fingerprint scan failed: {}", e);
                self.status = Status::Error(e.to_string());
                return;
            }
        };

        if bytes.is_empty() {
            log::warn!("⚠️  Scanner returned no image");
            self.status = Status::FingerprintCaptureFailed;
            return;
        }

        let path = self.fingerprint_path.clone();
        if let Err(e) = fingerprint::write_fingerprint(&bytes, &path) {
            log::error!("❌ Failed to write {}: {}", path.display(), e);
            self.status = Status::Error(e.to_string());
            return;
        }

        self.fingerprint_preview = self.load_preview(&path);
        self.session.fingerprint_path = Some(path);
        self.saved = false;
        self.status = Status::FingerprintCaptured;
    }

    /// Validate, confirm, insert.
    ///
    /// Database errors are returned to the caller untouched; see
    /// [`CaptureForm::report_error`].
    pub fn save(&mut self) -> Result<SaveOutcome, StoreError> {
        let Some(record) = self.session.to_record() else {
            self.status = Status::MissingFields;
            return Ok(SaveOutcome::Incomplete);
        };

        if !self.prompter.confirm_save() {
            return Ok(SaveOutcome::Declined);
        }

        let row_id = self.store.insert(&record)?;

        log::info!(
            "✅ Saved record for user {} (row {})",
            record.user_id,
            row_id
        );
        self.saved = true;
        self.status = Status::Saved;

        Ok(SaveOutcome::Saved(row_id))
    }

    /// Show an error that escaped a handler
    pub fn report_error(&mut self, error: impl fmt::Display) {
        self.status = Status::Error(error.to_string());
    }

    fn load_preview(&self, path: &Path) -> Option<PreviewImage> {
        match PreviewImage::load(path, self.preview_size) {
            Ok(preview) => {
                log::info!(
                    "🖼️  Preview {}x{} from {}",
                    preview.width,
                    preview.height,
                    preview.source.display()
                );
                Some(preview)
            }
            Err(e) => {
                log::warn!("⚠️  No preview for {}: {}", path.display(), e);
                None
            }
        }
    }
}
