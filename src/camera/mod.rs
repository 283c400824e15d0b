//! Camera facade
//!
//! [`Camera`] presents device settings as typed properties and mediates
//! capture. It composes a driver implementation with one
//! [`OptionListModel`] per tunable setting (shutter speed, aperture, ISO)
//! whose legal values the driver can enumerate, plus an owned
//! [`FilenameFormatter`] and an explicit capture directory.
//!
//! # Read masking
//!
//! Reads through [`get_setting`](Camera::get_setting) mask driver failures
//! to `None` so cosmetic UI reads never hard-fail on a transiently
//! unreadable property. Writes are strict and always surface the driver
//! error. This asymmetry is a deliberate contract, covered by tests on both
//! sides.

pub mod settings;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, warn};

use crate::core::error::{CameraError, Result};
use crate::core::formatter::FilenameFormatter;
use crate::core::options::{OptionEvent, OptionListModel};
use crate::device::traits::CameraDriver;
use settings::{ConfigSetting, Setting};

/// Construction-time options for the camera facade
#[derive(Debug, Clone)]
pub struct CameraOptions {
    /// When `true` (the default), stepped option models reach the device
    /// only at capture time. When `false`, every model step is pushed to the
    /// device immediately.
    pub apply_on_capture: bool,
    /// Directory that [`Camera::capture_named`] places files in
    pub capture_directory: Option<PathBuf>,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            apply_on_capture: true,
            capture_directory: None,
        }
    }
}

/// Per-capture value overrides for the tunable settings
///
/// An override is pushed verbatim to the device and takes precedence over
/// the matching option model's current value; it does not move the model's
/// cursor.
#[derive(Debug, Clone, Default)]
pub struct CaptureOverrides {
    pub shutterspeed: Option<String>,
    pub aperture: Option<String>,
    pub iso: Option<String>,
}

impl CaptureOverrides {
    /// No overrides; capture with the option models' current values
    pub fn none() -> Self {
        Self::default()
    }

    /// Override the shutter speed for this capture
    pub fn shutterspeed(mut self, value: impl Into<String>) -> Self {
        self.shutterspeed = Some(value.into());
        self
    }

    /// Override the aperture for this capture
    pub fn aperture(mut self, value: impl Into<String>) -> Self {
        self.aperture = Some(value.into());
        self
    }

    /// Override the ISO for this capture
    pub fn iso(mut self, value: impl Into<String>) -> Self {
        self.iso = Some(value.into());
        self
    }

    fn for_setting(&self, setting: ConfigSetting) -> Option<&str> {
        match setting {
            ConfigSetting::ShutterSpeed => self.shutterspeed.as_deref(),
            ConfigSetting::Aperture => self.aperture.as_deref(),
            ConfigSetting::Iso => self.iso.as_deref(),
            _ => None,
        }
    }
}

/// Result of a capture request
#[derive(Debug)]
pub enum Capture {
    /// The image was stored in a file at this path
    File(PathBuf),
    /// The image bytes were downloaded directly
    Stream(Vec<u8>),
}

/// Abstraction to manage camera settings and capture images
pub struct Camera<D: CameraDriver> {
    driver: Rc<RefCell<D>>,
    models: HashMap<ConfigSetting, OptionListModel<String>>,
    formatter: FilenameFormatter,
    capture_directory: Option<PathBuf>,
    apply_on_capture: bool,
}

impl<D: CameraDriver + 'static> Camera<D> {
    /// Create a facade around a driver with default options
    pub fn new(driver: D) -> Result<Self> {
        Self::with_options(driver, CameraOptions::default())
    }

    /// Create a facade around a driver
    ///
    /// Builds an option-list model for each tunable setting whose choices
    /// the driver enumerates, seeded with the device's current value. A
    /// device value that is readable but absent from its own choice list
    /// fails construction with
    /// [`OptionModelError::ValueNotInRange`](crate::core::error::OptionModelError);
    /// an unreadable value starts the model at the first choice.
    pub fn with_options(driver: D, options: CameraOptions) -> Result<Self> {
        let driver = Rc::new(RefCell::new(driver));
        let mut models = HashMap::new();
        for setting in ConfigSetting::TUNABLE {
            if let Some(model) = Self::build_model(&driver, setting, options.apply_on_capture)? {
                models.insert(setting, model);
            }
        }
        Ok(Self {
            driver,
            models,
            formatter: FilenameFormatter::new(),
            capture_directory: options.capture_directory,
            apply_on_capture: options.apply_on_capture,
        })
    }

    fn build_model(
        driver: &Rc<RefCell<D>>,
        setting: ConfigSetting,
        apply_on_capture: bool,
    ) -> Result<Option<OptionListModel<String>>> {
        let choices = driver.borrow().get_choices_for(setting);
        let Some(choices) = choices else {
            debug!("{setting}: no enumerable choices, skipping model");
            return Ok(None);
        };
        // An empty enumeration cannot form a model.
        if choices.is_empty() {
            return Ok(None);
        }
        let current = driver.borrow().get_value_for(setting.into()).ok();
        let mut model = match current {
            Some(value) => OptionListModel::with_value(choices, &value)?,
            None => OptionListModel::new(choices)?,
        };
        if !apply_on_capture {
            let driver = Rc::clone(driver);
            model.subscribe(
                OptionEvent::Changed,
                Rc::new(move |m: &OptionListModel<String>| {
                    // Driver failures must not unwind through the notifier;
                    // the device keeps whatever value it had.
                    if let Err(err) = driver.borrow_mut().set_value_for(setting, m.value()) {
                        warn!("failed to apply {setting} to device: {err}");
                    }
                }),
            )?;
        }
        Ok(Some(model))
    }

    /// The option-list model for a tunable setting, if the device exposed one
    pub fn model(&self, setting: ConfigSetting) -> Option<&OptionListModel<String>> {
        self.models.get(&setting)
    }

    /// Mutable access to a tunable setting's model, for stepping
    pub fn model_mut(&mut self, setting: ConfigSetting) -> Option<&mut OptionListModel<String>> {
        self.models.get_mut(&setting)
    }

    /// The owned filename formatter
    pub fn formatter(&self) -> &FilenameFormatter {
        &self.formatter
    }

    /// Mutable access to the owned filename formatter
    pub fn formatter_mut(&mut self) -> &mut FilenameFormatter {
        &mut self.formatter
    }

    /// Directory that [`capture_named`](Self::capture_named) writes into
    pub fn capture_directory(&self) -> Option<&Path> {
        self.capture_directory.as_deref()
    }

    /// Change the capture directory
    pub fn set_capture_directory(&mut self, directory: impl Into<PathBuf>) {
        self.capture_directory = Some(directory.into());
    }

    /// Whether model steps are deferred to capture time
    pub fn apply_on_capture(&self) -> bool {
        self.apply_on_capture
    }

    /// Read any setting from the device, masking unreadable ones to `None`
    pub fn get_setting(&self, setting: impl Into<Setting>) -> Option<String> {
        self.driver.borrow().get_value_for(setting.into()).ok()
    }

    /// Write a configurable setting to the device
    ///
    /// Unlike reads, write failures always propagate. No local cache is
    /// updated; the option models are left untouched.
    pub fn set_setting(&mut self, setting: ConfigSetting, value: &str) -> Result<()> {
        self.driver.borrow_mut().set_value_for(setting, value)?;
        Ok(())
    }

    /// Grab a frame from the camera, to a file or as a byte stream
    ///
    /// Resolves each tunable setting as: explicit override, else the
    /// matching model's current value, else skip; pushes the resolved values
    /// to the device; then captures. With a `filename` the image is stored
    /// there and the written path returned, otherwise the bytes are
    /// returned directly.
    pub fn grab_frame(
        &mut self,
        filename: Option<&Path>,
        overrides: &CaptureOverrides,
    ) -> Result<Capture> {
        self.push_tunables(overrides)?;
        match filename {
            Some(path) => Ok(Capture::File(
                self.driver.borrow_mut().capture_to_file(Some(path))?,
            )),
            None => Ok(Capture::Stream(self.driver.borrow_mut().capture_to_stream()?)),
        }
    }

    /// Capture to a file named by the owned formatter
    ///
    /// Asks the formatter for the next name (advancing its sequence
    /// counter), resolves it against the capture directory, and captures to
    /// that file.
    pub fn capture_named(&mut self, original: &str, overrides: &CaptureOverrides) -> Result<PathBuf> {
        self.push_tunables(overrides)?;
        let name = self.formatter.get_filename(original)?;
        let path = match &self.capture_directory {
            Some(directory) => directory.join(name),
            None => PathBuf::from(name),
        };
        let written = self.driver.borrow_mut().capture_to_file(Some(&path))?;
        Ok(written)
    }

    /// Configure phase of the two-phase capture protocol
    ///
    /// Fails with [`CameraError::NotCapable`] before any device write when
    /// the driver cannot capture. There is no atomicity across the phase
    /// boundary: a failure after some writes leaves the device in the newly
    /// configured state.
    fn push_tunables(&mut self, overrides: &CaptureOverrides) -> Result<()> {
        if !self.driver.borrow().can_capture_image() {
            return Err(CameraError::NotCapable);
        }
        for setting in ConfigSetting::TUNABLE {
            let value = overrides
                .for_setting(setting)
                .map(str::to_string)
                .or_else(|| self.models.get(&setting).map(|m| m.value().clone()));
            if let Some(value) = value {
                self.driver.borrow_mut().set_value_for(setting, &value)?;
            }
        }
        Ok(())
    }
}
