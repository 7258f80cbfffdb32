use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;

use crate::controller::Prompter;

/// Native dialogs. Each call blocks until the user answers.
#[derive(Debug, Default)]
pub struct DialogPrompter;

impl Prompter for DialogPrompter {
    fn choose_photo_destination(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Save Image")
            .add_filter("Images", &["png", "jpg"])
            .save_file()
    }

    fn confirm_save(&mut self) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Confirm Save")
            .set_description("Are you sure you want to save this data?")
            .set_buttons(MessageButtons::YesNo)
            .show();

        matches!(answer, MessageDialogResult::Yes)
    }
}
