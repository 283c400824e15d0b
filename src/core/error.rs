//! Error types for the camera tether tool
//!
//! Each layer of the tool owns a small error enum: the driver boundary,
//! the option-list model, the notification hub and the filename formatter.
//! `CameraError` is the facade-level type the others wrap into.

use thiserror::Error;

/// Errors surfaced by a camera driver implementation
#[derive(Error, Debug)]
pub enum DriverError {
    /// The driver or the device behind it is not ready for communication
    #[error("device not ready: {0}")]
    NotReady(String),

    /// The setting is unknown to the device or cannot be read right now
    #[error("unknown or unreadable setting '{0}'")]
    UnknownSetting(String),

    /// Pushing a value to the device failed
    #[error("failed to set '{setting}': {message}")]
    SetFailed { setting: String, message: String },

    /// Triggering or downloading a capture failed
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    /// I/O error while writing captured data
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the option-list model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionModelError {
    /// An option list needs at least one legal value
    #[error("option list is empty")]
    EmptyModel,

    /// The starting index is outside the legal value list
    #[error("index {index} out of range for {count} options")]
    InvalidIndex { index: usize, count: usize },

    /// The starting value is not one of the legal values
    #[error("value '{0}' is not in the option list")]
    ValueNotInRange(String),
}

/// Errors raised by the notification hub
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The event kind was not declared when the hub was built
    #[error("channel {0} is not declared on this hub")]
    InvalidChannel(String),
}

/// Errors raised by the filename formatter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The key cannot be used as a placeholder name
    #[error("invalid filename key '{0}'")]
    InvalidKey(String),

    /// The rename rule references a key that is not in the field set
    #[error("rename rule references unknown key '{0}'")]
    MissingKey(String),

    /// The format spec is malformed or does not apply to the value
    #[error("bad format spec '{spec}' for key '{key}'")]
    BadFormatSpec { key: String, spec: String },

    /// A `{` without its `}` (or a stray `}`) in the rename rule
    #[error("unbalanced braces in rename rule")]
    UnbalancedBraces,
}

/// Facade-level error type for camera operations
#[derive(Error, Debug)]
pub enum CameraError {
    /// The device reports that it cannot capture images
    #[error("camera cannot capture images")]
    NotCapable,

    /// Error from the underlying camera driver
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Error from an option-list model
    #[error(transparent)]
    OptionModel(#[from] OptionModelError),

    /// Error from the notification hub
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// Error from the filename formatter
    #[error(transparent)]
    Format(#[from] FormatError),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for facade-level operations
pub type Result<T> = std::result::Result<T, CameraError>;
