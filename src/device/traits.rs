//! Driver abstraction trait for camera hardware
//!
//! The core never talks to camera hardware directly. It consumes the
//! [`CameraDriver`] trait, which is the narrow contract a hardware binding
//! (libgphoto2, a PTP transport, …) has to provide: get/set a named setting,
//! enumerate legal choices, and capture an image. The mock implementation in
//! [`crate::testdb`] implements the same trait, so the whole facade can be
//! exercised without a connected camera.
//!
//! Blocking I/O happens only behind this boundary. The core imposes no
//! timeout of its own; a driver that blocks indefinitely blocks its caller.

use std::path::{Path, PathBuf};

use crate::camera::settings::{ConfigSetting, Setting};
use crate::core::error::DriverError;

/// Contract between the camera facade and a hardware binding
///
/// Write access takes [`ConfigSetting`], so read-only settings cannot be
/// pushed to the device by construction. A failing `set_value_for` must not
/// corrupt driver-side state; whether the device rolls back is the driver's
/// concern, the facade does not attempt it.
pub trait CameraDriver {
    /// Enumerate the legal choices for a setting
    ///
    /// Returns `None` when the device does not expose an enumerable list for
    /// this setting. Not every setting has one.
    fn get_choices_for(&self, setting: ConfigSetting) -> Option<Vec<String>>;

    /// Read the current value of a setting
    ///
    /// Fails with [`DriverError::UnknownSetting`] when the setting is unknown
    /// to the device or cannot be read right now.
    fn get_value_for(&self, setting: Setting) -> Result<String, DriverError>;

    /// Push a value to the physical device
    fn set_value_for(&mut self, setting: ConfigSetting, value: &str) -> Result<(), DriverError>;

    /// Whether the device is able to capture images at all
    fn can_capture_image(&self) -> bool;

    /// Trigger a capture and store the image in a file
    ///
    /// When `filename` is `None` the driver picks a name of its own (usually
    /// the camera-assigned one). Returns the path actually written.
    fn capture_to_file(&mut self, filename: Option<&Path>) -> Result<PathBuf, DriverError>;

    /// Trigger a capture and return the image bytes directly
    fn capture_to_stream(&mut self) -> Result<Vec<u8>, DriverError>;
}
