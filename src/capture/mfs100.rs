/// MFS100 scanner backend
///
/// Links against `libmfs100`, a thin C shim this crate expects to sit over
/// the vendor driver. The shim is not shipped by the vendor: the functions
/// below (`mfs100_init`, `mfs100_auto_capture`, ...) describe the interface
/// such a wrapper has to provide, and the `mfs100` feature only links once
/// one is installed. Return codes are 0 on success; on failure
/// `mfs100_last_error` describes the code.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_uchar};

use super::fingerprint::ScannerDriver;
use crate::error::ScannerError;

mod ffi {
    use super::{c_char, c_int, c_uchar};

    #[link(name = "mfs100")]
    extern "C" {
        pub fn mfs100_init() -> c_int;
        pub fn mfs100_uninit() -> c_int;
        /// `timeout_ms == 0` waits until a finger is detected
        pub fn mfs100_auto_capture(
            timeout_ms: c_int,
            image: *mut *mut c_uchar,
            image_len: *mut usize,
        ) -> c_int;
        pub fn mfs100_free(image: *mut c_uchar, image_len: usize);
        pub fn mfs100_last_error() -> *const c_char;
    }
}

/// Wait forever for a finger
const NO_TIMEOUT: c_int = 0;

/// Device calls of the MFS100 reader
#[derive(Debug, Default)]
pub struct Mfs100Driver;

impl Mfs100Driver {
    pub fn new() -> Self {
        Mfs100Driver
    }
}

impl ScannerDriver for Mfs100Driver {
    fn init(&mut self) -> Result<(), ScannerError> {
        let code = unsafe { ffi::mfs100_init() };
        if code != 0 {
            return Err(ScannerError::Unavailable(format!(
                "{} (code {})",
                last_error(),
                code
            )));
        }
        Ok(())
    }

    fn capture(&mut self) -> Result<Vec<u8>, ScannerError> {
        let mut image: *mut c_uchar = std::ptr::null_mut();
        let mut image_len: usize = 0;
        let code = unsafe { ffi::mfs100_auto_capture(NO_TIMEOUT, &mut image, &mut image_len) };

        if code != 0 {
            return Err(ScannerError::Driver {
                code,
                message: last_error(),
            });
        }

        if image.is_null() {
            return Ok(Vec::new());
        }

        let bytes = if image_len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(image, image_len) }.to_vec()
        };
        unsafe { ffi::mfs100_free(image, image_len) };

        Ok(bytes)
    }

    fn uninit(&mut self) {
        let code = unsafe { ffi::mfs100_uninit() };
        if code != 0 {
            log::warn!(
                "⚠️  MFS100 uninit returned {}: {}",
                code,
                last_error()
            );
        }
    }
}

fn last_error() -> String {
    let message = unsafe { ffi::mfs100_last_error() };
    if message.is_null() {
        return "unknown scanner error".to_string();
    }

    unsafe { CStr::from_ptr(message) }.to_string_lossy().to_string()
}
