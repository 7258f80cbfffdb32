use iced::widget::{button, column, container, image, row, text, text_input};
use iced::{Alignment, ContentFit, Element, Length, Task, Theme};

mod capture;
mod controller;
mod error;
mod state;
mod ui;

use capture::camera::NokhwaCamera;
use capture::fingerprint;
use controller::CaptureForm;
use state::config::AppConfig;
use state::store::SqliteRecordStore;
use ui::dialogs::DialogPrompter;
use ui::preview::PreviewImage;

/// Main application state
struct BioCapture {
    form: CaptureForm,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    NameChanged(String),
    UserIdChanged(String),
    /// User clicked "Capture Photo"
    CapturePhoto,
    /// User clicked "Scan Fingerprint"
    ScanFingerprint,
    /// User clicked "Save Data"
    Save,
}

impl BioCapture {
    fn new(config: AppConfig, store: SqliteRecordStore) -> (Self, Task<Message>) {
        let form = CaptureForm::new(
            Box::new(NokhwaCamera::new(config.camera_index)),
            fingerprint::default_scanner(),
            Box::new(store),
            Box::new(DialogPrompter),
            &config,
        );

        (BioCapture { form }, Task::none())
    }

    /// Handle application messages and update state.
    /// Captures and saves block until the device or database answers.
    fn update(&mut self, message: Message) -> Task<Message> {
        let before = self.form.stage();

        match message {
            Message::NameChanged(name) => self.form.set_user_name(name),
            Message::UserIdChanged(user_id) => self.form.set_user_id(user_id),
            Message::CapturePhoto => self.form.capture_photo(),
            Message::ScanFingerprint => self.form.scan_fingerprint(),
            Message::Save => {
                if let Err(e) = self.form.save() {
                    log::error!("❌ Save failed: {}", e);
                    self.form.report_error(e);
                }
            }
        }

        let after = self.form.stage();
        if after != before {
            log::info!("🔀 Form stage: {:?} -> {:?}", before, after);
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let session = self.form.session();
        let pane = self.form.preview_size() as f32;

        let name = row![
            text("Name:").width(Length::Fixed(80.0)),
            text_input("", &session.user_name).on_input(Message::NameChanged),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let user_id = row![
            text("User ID:").width(Length::Fixed(80.0)),
            text_input("", &session.user_id).on_input(Message::UserIdChanged),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let photo = column![
            preview_pane(self.form.photo_preview(), "Photo Preview", pane),
            button("Capture Photo")
                .on_press(Message::CapturePhoto)
                .padding(10),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let fingerprint = column![
            preview_pane(self.form.fingerprint_preview(), "Fingerprint Preview", pane),
            button("Scan Fingerprint")
                .on_press(Message::ScanFingerprint)
                .padding(10),
        ]
        .spacing(10)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let content = column![
            name,
            user_id,
            row![photo, fingerprint].spacing(20),
            container(button("Save Data").on_press(Message::Save).padding(10))
                .center_x(Length::Fill),
            text(self.form.status().to_string()).size(16),
        ]
        .spacing(20)
        .padding(40);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Square pane showing a preview, or placeholder text until there is one
fn preview_pane<'a>(
    preview: Option<&PreviewImage>,
    placeholder: &'a str,
    size: f32,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match preview {
        Some(preview) => image(preview.handle())
            .content_fit(ContentFit::Contain)
            .width(size)
            .height(size)
            .into(),
        None => text(placeholder).into(),
    };

    container(content).center_x(size).center_y(size).into()
}

/// Records already in the store, or 0 if they can't be counted
fn saved_record_count(store: &SqliteRecordStore) -> i64 {
    match store.count() {
        Ok(count) => count,
        Err(e) => {
            log::warn!("⚠️  Could not count saved records: {}", e);
            0
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let config = AppConfig::load_or_default();
    let store = SqliteRecordStore::open(&config.database_path)?;
    log::info!("📁 Record store at: {}", store.path().display());

    let record_count = saved_record_count(&store);
    log::info!(
        "🪪 Bio capture initialized with {} saved records",
        record_count
    );

    iced::application(
        "Bio-Metric Data Capture",
        BioCapture::update,
        BioCapture::view,
    )
    .theme(BioCapture::theme)
    .window_size((800.0, 600.0))
    .centered()
    .run_with(move || BioCapture::new(config, store))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::BiometricRecord;
    use crate::state::store::RecordStore;
    use tempfile::tempdir;

    #[test]
    fn test_saved_record_count_reads_store() {
        let dir = tempdir().unwrap();
        let store = SqliteRecordStore::open(dir.path().join("biometric.db")).unwrap();
        store
            .insert(&BiometricRecord {
                user_id: "3".to_string(),
                name: "Lena".to_string(),
                photo_path: "lena.png".to_string(),
                fingerprint_path: "fingerprint.bmp".to_string(),
            })
            .unwrap();

        assert_eq!(saved_record_count(&store), 1);
    }

    #[test]
    fn test_saved_record_count_falls_back_on_database_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("biometric.db");
        let store = SqliteRecordStore::open(&db_path).unwrap();
        rusqlite::Connection::open(&db_path)
            .unwrap()
            .execute("DROP TABLE users", [])
            .unwrap();

        assert!(store.count().is_err());
        assert_eq!(saved_record_count(&store), 0);
    }
}
