/// Fingerprint scanning
///
/// The scanner is an owned dependency of the form with a single
/// capability: block until a finger is captured and hand back the image.

use std::path::Path;

use crate::error::ScannerError;

/// A fingerprint reader that captures automatically once a finger is placed
pub trait FingerprintScanner {
    /// Blocks until the device returns. An empty vector means the device
    /// answered but produced no image.
    fn auto_capture(&mut self) -> Result<Vec<u8>, ScannerError>;
}

/// Raw device calls of a scanner driver
pub trait ScannerDriver {
    fn init(&mut self) -> Result<(), ScannerError>;

    /// Only called between a successful `init` and the matching `uninit`
    fn capture(&mut self) -> Result<Vec<u8>, ScannerError>;

    fn uninit(&mut self);
}

/// Scanner that initializes the device for each capture and always
/// uninitializes it afterwards
pub struct SessionScanner<D: ScannerDriver> {
    driver: D,
}

impl<D: ScannerDriver> SessionScanner<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }
}

impl<D: ScannerDriver> FingerprintScanner for SessionScanner<D> {
    fn auto_capture(&mut self) -> Result<Vec<u8>, ScannerError> {
        let mut session = DeviceSession::open(&mut self.driver)?;
        session.driver.capture()
    }
}

/// Initialized device; uninitialized when dropped, on every exit path
struct DeviceSession<'a, D: ScannerDriver> {
    driver: &'a mut D,
}

impl<'a, D: ScannerDriver> DeviceSession<'a, D> {
    fn open(driver: &'a mut D) -> Result<Self, ScannerError> {
        driver.init()?;
        Ok(Self { driver })
    }
}

impl<D: ScannerDriver> Drop for DeviceSession<'_, D> {
    fn drop(&mut self) {
        self.driver.uninit();
    }
}

/// Driver used when no scanner backend is compiled in; never initializes
pub struct UnavailableDriver {
    reason: String,
}

impl UnavailableDriver {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ScannerDriver for UnavailableDriver {
    fn init(&mut self) -> Result<(), ScannerError> {
        Err(ScannerError::Unavailable(self.reason.clone()))
    }

    fn capture(&mut self) -> Result<Vec<u8>, ScannerError> {
        Err(ScannerError::Unavailable(self.reason.clone()))
    }

    fn uninit(&mut self) {}
}

/// The scanner this build talks to
#[cfg(feature = "mfs100")]
pub fn default_scanner() -> Box<dyn FingerprintScanner> {
    Box::new(SessionScanner::new(super::mfs100::Mfs100Driver::new()))
}

/// The scanner this build talks to
#[cfg(not(feature = "mfs100"))]
pub fn default_scanner() -> Box<dyn FingerprintScanner> {
    Box::new(SessionScanner::new(UnavailableDriver::new(
        "built without MFS100 support (enable the `mfs100` feature)",
    )))
}

/// Write the raw image bytes to `path`, replacing any earlier scan
pub fn write_fingerprint(bytes: &[u8], path: &Path) -> std::io::Result<()> {
    std::fs::write(path, bytes)?;
    log::info!(
        "💾 Fingerprint written to {} ({} bytes)",
        path.display(),
        bytes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::tempdir;

    enum Reply {
        Image(Vec<u8>),
        Fail,
    }

    struct FakeDriver {
        init_ok: bool,
        reply: Reply,
        calls: Rc<RefCell<Vec<&'static str>>>,
    }

    impl FakeDriver {
        fn new(init_ok: bool, reply: Reply) -> (Self, Rc<RefCell<Vec<&'static str>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            let driver = FakeDriver {
                init_ok,
                reply,
                calls: calls.clone(),
            };
            (driver, calls)
        }
    }

    impl ScannerDriver for FakeDriver {
        fn init(&mut self) -> Result<(), ScannerError> {
            self.calls.borrow_mut().push("init");
            if self.init_ok {
                Ok(())
            } else {
                Err(ScannerError::Unavailable("USB device not found".to_string()))
            }
        }

        fn capture(&mut self) -> Result<Vec<u8>, ScannerError> {
            self.calls.borrow_mut().push("capture");
            match &self.reply {
                Reply::Image(bytes) => Ok(bytes.clone()),
                Reply::Fail => Err(ScannerError::Driver {
                    code: -1140,
                    message: "Timeout".to_string(),
                }),
            }
        }

        fn uninit(&mut self) {
            self.calls.borrow_mut().push("uninit");
        }
    }

    #[test]
    fn test_successful_capture_releases_device() {
        let (driver, calls) = FakeDriver::new(true, Reply::Image(b"BM..".to_vec()));
        let mut scanner = SessionScanner::new(driver);

        assert_eq!(scanner.auto_capture().unwrap(), b"BM..");
        assert_eq!(*calls.borrow(), vec!["init", "capture", "uninit"]);
    }

    #[test]
    fn test_failed_capture_still_releases_device() {
        let (driver, calls) = FakeDriver::new(true, Reply::Fail);
        let mut scanner = SessionScanner::new(driver);

        let err = scanner.auto_capture().unwrap_err();

        assert!(err.to_string().contains("Timeout"));
        assert_eq!(*calls.borrow(), vec!["init", "capture", "uninit"]);
    }

    #[test]
    fn test_failed_init_skips_capture_and_uninit() {
        let (driver, calls) = FakeDriver::new(false, Reply::Fail);
        let mut scanner = SessionScanner::new(driver);

        assert!(matches!(
            scanner.auto_capture(),
            Err(ScannerError::Unavailable(_))
        ));
        assert_eq!(*calls.borrow(), vec!["init"]);
    }

    #[test]
    fn test_repeated_scans_pair_init_and_uninit() {
        let (driver, calls) = FakeDriver::new(true, Reply::Image(vec![1]));
        let mut scanner = SessionScanner::new(driver);

        scanner.auto_capture().unwrap();
        scanner.auto_capture().unwrap();

        let calls = calls.borrow();
        let inits = calls.iter().filter(|c| **c == "init").count();
        let uninits = calls.iter().filter(|c| **c == "uninit").count();
        assert_eq!((inits, uninits), (2, 2));
    }

    #[test]
    fn test_unavailable_driver_reports_reason() {
        let mut scanner = SessionScanner::new(UnavailableDriver::new("no reader attached"));

        let err = scanner.auto_capture().unwrap_err();

        assert!(err.to_string().contains("no reader attached"));
    }

    #[test]
    fn test_write_fingerprint_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fingerprint.bmp");

        write_fingerprint(b"first scan, longer", &path).unwrap();
        write_fingerprint(b"second", &path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}
