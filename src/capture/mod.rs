/// Capture devices
///
/// This module handles:
/// - Grabbing a single still frame from the webcam (camera.rs)
/// - Auto-capturing a fingerprint image (fingerprint.rs)
/// - The MFS100 driver bindings, with the `mfs100` feature (mfs100.rs)

pub mod camera;
pub mod fingerprint;
#[cfg(feature = "mfs100")]
pub mod mfs100;
