/// Display-side helpers for the capture form
///
/// - Preview decoding and fitting (preview.rs)
/// - Native save/confirm dialogs (dialogs.rs)

pub mod dialogs;
pub mod preview;
