//! Camera Tether Tool Library
//!
//! A library for controlling a tethered capture device (a camera) through a
//! narrow, swappable driver interface, and for renaming captured files with
//! a small templating language.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Hardware-independent building blocks: error types, the
//!   notification hub, option-list models, and the filename formatter
//! - [`camera`] - The camera facade and the closed setting vocabularies
//! - [`device`] - The driver capability trait a hardware binding implements
//! - [`config`] - TOML configuration loading and defaults
//! - [`cli`] - Command-line interface (only used by the binary)
//! - [`testdb`] - Mock camera driver for testing without hardware
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use camera_tether_tool::camera::settings::ConfigSetting;
//! use camera_tether_tool::camera::{Camera, CaptureOverrides};
//! use camera_tether_tool::testdb::MockCamera;
//!
//! fn main() -> anyhow::Result<()> {
//!     // A hardware binding would replace the mock here.
//!     let mut camera = Camera::new(MockCamera::new())?;
//!
//!     // Step the ISO one stop up and capture through the rename rule.
//!     if let Some(iso) = camera.model_mut(ConfigSetting::Iso) {
//!         iso.next();
//!     }
//!     camera.formatter_mut().set_rename_rule("{YYYY}{MM}{DD}_{seq:04}.{EXT}");
//!     let path = camera.capture_named("capture.jpg", &CaptureOverrides::none())?;
//!     println!("captured {}", path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing Without a Camera
//!
//! The [`testdb`] module provides a mock driver implementing the same
//! [`CameraDriver`](device::traits::CameraDriver) contract as a hardware
//! binding, with configurable failure behavior:
//!
//! ```rust
//! use camera_tether_tool::camera::Camera;
//! use camera_tether_tool::testdb::MockCamera;
//!
//! let mock = MockCamera::new().without_capture();
//! let probe = mock.clone();
//! let _camera = Camera::new(mock).unwrap();
//! assert!(probe.set_log().is_empty());
//! ```

pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod device;
pub mod testdb;

// Re-export the main entry points at the crate root
pub use crate::camera::settings::{ConfigSetting, ReadOnlySetting, Setting};
pub use crate::camera::{Camera, CameraOptions, Capture, CaptureOverrides};
pub use crate::core::error::{
    CameraError, DriverError, FormatError, NotifyError, OptionModelError, Result,
};
pub use crate::core::formatter::FilenameFormatter;
pub use crate::core::options::{OptionEvent, OptionListModel};
pub use crate::device::traits::CameraDriver;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
