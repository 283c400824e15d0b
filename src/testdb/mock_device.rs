//! Mock camera driver for testing without hardware
//!
//! [`MockCamera`] implements [`CameraDriver`] over an in-memory device
//! model: a set of current values, enumerable choice lists for the tunable
//! settings, and configurable failure behavior (unreadable settings, failing
//! writes, a device that cannot capture). State lives behind an
//! `Arc<RwLock>` so a test can keep a clone of the mock as a probe while the
//! camera facade owns the driver.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::camera::settings::{ConfigSetting, ReadOnlySetting, Setting};
use crate::core::error::DriverError;
use crate::device::traits::CameraDriver;

/// JPEG markers framing the fake image payload
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Shared state of a simulated camera
#[derive(Debug)]
struct MockCameraState {
    choices: HashMap<ConfigSetting, Vec<String>>,
    values: HashMap<Setting, String>,
    unreadable: HashSet<Setting>,
    failing_writes: HashSet<ConfigSetting>,
    capture_capable: bool,
    set_log: Vec<(ConfigSetting, String)>,
    frame_counter: u32,
}

impl Default for MockCameraState {
    fn default() -> Self {
        let mut choices = HashMap::new();
        choices.insert(
            ConfigSetting::ShutterSpeed,
            to_strings(&["1/500", "1/250", "1/125", "1/60", "1/30"]),
        );
        choices.insert(
            ConfigSetting::Aperture,
            to_strings(&["2.8", "4", "5.6", "8", "11"]),
        );
        choices.insert(
            ConfigSetting::Iso,
            to_strings(&["100", "200", "400", "800", "1600", "3200"]),
        );

        let mut values = HashMap::new();
        values.insert(ConfigSetting::ShutterSpeed.into(), "1/125".to_string());
        values.insert(ConfigSetting::Aperture.into(), "5.6".to_string());
        values.insert(ConfigSetting::Iso.into(), "200".to_string());
        values.insert(ConfigSetting::FocusMode.into(), "One Shot".to_string());
        values.insert(ConfigSetting::DriveMode.into(), "Single".to_string());
        values.insert(ConfigSetting::ImageFormat.into(), "RAW".to_string());
        values.insert(ConfigSetting::MeteringMode.into(), "Evaluative".to_string());
        values.insert(ConfigSetting::WhiteBalance.into(), "Auto".to_string());
        values.insert(ReadOnlySetting::CameraModel.into(), "Tether Mock Mk II".to_string());
        values.insert(ReadOnlySetting::SerialNumber.into(), "000123456".to_string());
        values.insert(ReadOnlySetting::LensName.into(), "50mm f/1.8".to_string());
        values.insert(ReadOnlySetting::BatteryLevel.into(), "100%".to_string());
        values.insert(ReadOnlySetting::ShutterCounter.into(), "4242".to_string());

        Self {
            choices,
            values,
            unreadable: HashSet::new(),
            failing_writes: HashSet::new(),
            capture_capable: true,
            set_log: Vec::new(),
            frame_counter: 0,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Simulated tethered camera implementing the driver contract
///
/// Cloning yields a second handle onto the same device state, useful as a
/// probe after the facade has taken ownership of the driver.
#[derive(Debug, Clone, Default)]
pub struct MockCamera {
    state: Arc<RwLock<MockCameraState>>,
}

impl MockCamera {
    /// Create a mock camera with a realistic default setting table
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a device that reports no capture support
    pub fn without_capture(self) -> Self {
        self.write().capture_capable = false;
        self
    }

    /// Mark a setting as unreadable (reads fail driver-side)
    pub fn with_unreadable(self, setting: Setting) -> Self {
        self.write().unreadable.insert(setting);
        self
    }

    /// Make writes to a setting fail
    pub fn with_failing_write(self, setting: ConfigSetting) -> Self {
        self.write().failing_writes.insert(setting);
        self
    }

    /// Replace the choice list for a setting
    pub fn with_choices(self, setting: ConfigSetting, choices: Vec<String>) -> Self {
        self.write().choices.insert(setting, choices);
        self
    }

    /// Overwrite a stored device value, bypassing choice validation
    pub fn with_value(self, setting: Setting, value: impl Into<String>) -> Self {
        self.write().values.insert(setting, value.into());
        self
    }

    /// Every `(setting, value)` write the device received, in order
    pub fn set_log(&self) -> Vec<(ConfigSetting, String)> {
        self.read().set_log.clone()
    }

    /// Number of frames captured so far
    pub fn capture_count(&self) -> u32 {
        self.read().frame_counter
    }

    /// Current device-side value of a setting
    pub fn value_of(&self, setting: Setting) -> Option<String> {
        self.read().values.get(&setting).cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, MockCameraState> {
        self.state.read().expect("mock camera state lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockCameraState> {
        self.state.write().expect("mock camera state lock poisoned")
    }

    fn frame_bytes(frame: u32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(64);
        bytes.extend_from_slice(&JPEG_SOI);
        bytes.extend_from_slice(&frame.to_be_bytes());
        bytes.extend_from_slice(b"mock frame payload");
        bytes.extend_from_slice(&JPEG_EOI);
        bytes
    }
}

impl CameraDriver for MockCamera {
    fn get_choices_for(&self, setting: ConfigSetting) -> Option<Vec<String>> {
        self.read().choices.get(&setting).cloned()
    }

    fn get_value_for(&self, setting: Setting) -> Result<String, DriverError> {
        let state = self.read();
        if state.unreadable.contains(&setting) {
            return Err(DriverError::UnknownSetting(setting.name().to_string()));
        }
        state
            .values
            .get(&setting)
            .cloned()
            .ok_or_else(|| DriverError::UnknownSetting(setting.name().to_string()))
    }

    fn set_value_for(&mut self, setting: ConfigSetting, value: &str) -> Result<(), DriverError> {
        let mut state = self.write();
        if state.failing_writes.contains(&setting) {
            return Err(DriverError::SetFailed {
                setting: setting.name().to_string(),
                message: "simulated write failure".to_string(),
            });
        }
        if let Some(choices) = state.choices.get(&setting) {
            if !choices.iter().any(|choice| choice == value) {
                return Err(DriverError::SetFailed {
                    setting: setting.name().to_string(),
                    message: format!("'{value}' is not a legal choice"),
                });
            }
        }
        state.set_log.push((setting, value.to_string()));
        state.values.insert(setting.into(), value.to_string());
        Ok(())
    }

    fn can_capture_image(&self) -> bool {
        self.read().capture_capable
    }

    fn capture_to_file(&mut self, filename: Option<&Path>) -> Result<PathBuf, DriverError> {
        let mut state = self.write();
        if !state.capture_capable {
            return Err(DriverError::CaptureFailed(
                "device reports no capture support".to_string(),
            ));
        }
        state.frame_counter += 1;
        let path = match filename {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(format!("CAPT_{:04}.JPG", state.frame_counter)),
        };
        fs::write(&path, Self::frame_bytes(state.frame_counter))?;
        Ok(path)
    }

    fn capture_to_stream(&mut self) -> Result<Vec<u8>, DriverError> {
        let mut state = self.write();
        if !state.capture_capable {
            return Err(DriverError::CaptureFailed(
                "device reports no capture support".to_string(),
            ));
        }
        state.frame_counter += 1;
        Ok(Self::frame_bytes(state.frame_counter))
    }
}
