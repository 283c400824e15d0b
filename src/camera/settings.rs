//! Closed vocabularies of camera setting names
//!
//! Settings come in two kinds: *configurable* settings have a legal-value
//! enumeration and can be written, *read-only* settings are reported by the
//! device and never written. Both sets are closed: the facade intercepts
//! exactly these names and nothing else. Each variant maps to the wire name
//! the driver understands.

use std::fmt;

/// Writable device settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSetting {
    FocusMode,
    DriveMode,
    ImageFormat,
    MeteringMode,
    ShutterSpeed,
    Aperture,
    Iso,
    WhiteBalance,
}

impl ConfigSetting {
    /// Every configurable setting, in declaration order
    pub const ALL: [Self; 8] = [
        Self::FocusMode,
        Self::DriveMode,
        Self::ImageFormat,
        Self::MeteringMode,
        Self::ShutterSpeed,
        Self::Aperture,
        Self::Iso,
        Self::WhiteBalance,
    ];

    /// The settings the facade keeps option-list models for
    pub const TUNABLE: [Self; 3] = [Self::ShutterSpeed, Self::Aperture, Self::Iso];

    /// Wire name of the setting
    pub fn name(self) -> &'static str {
        match self {
            Self::FocusMode => "focusmode",
            Self::DriveMode => "drivemode",
            Self::ImageFormat => "imageformat",
            Self::MeteringMode => "meteringmode",
            Self::ShutterSpeed => "shutterspeed",
            Self::Aperture => "aperture",
            Self::Iso => "iso",
            Self::WhiteBalance => "whitebalance",
        }
    }

    /// Resolve a wire name back to a setting
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for ConfigSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Device-reported settings that are never written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadOnlySetting {
    ShutterCounter,
    LensName,
    CameraModel,
    SerialNumber,
    BatteryLevel,
}

impl ReadOnlySetting {
    /// Every read-only setting, in declaration order
    pub const ALL: [Self; 5] = [
        Self::ShutterCounter,
        Self::LensName,
        Self::CameraModel,
        Self::SerialNumber,
        Self::BatteryLevel,
    ];

    /// Wire name of the setting
    pub fn name(self) -> &'static str {
        match self {
            Self::ShutterCounter => "shuttercounter",
            Self::LensName => "lensname",
            Self::CameraModel => "cameramodel",
            Self::SerialNumber => "serialnumber",
            Self::BatteryLevel => "batterylevel",
        }
    }

    /// Resolve a wire name back to a setting
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for ReadOnlySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any readable device setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// A configurable setting
    Config(ConfigSetting),
    /// A read-only setting
    ReadOnly(ReadOnlySetting),
}

impl Setting {
    /// Wire name of the setting
    pub fn name(self) -> &'static str {
        match self {
            Self::Config(setting) => setting.name(),
            Self::ReadOnly(setting) => setting.name(),
        }
    }

    /// Resolve a wire name against both vocabularies
    pub fn from_name(name: &str) -> Option<Self> {
        ConfigSetting::from_name(name)
            .map(Self::Config)
            .or_else(|| ReadOnlySetting::from_name(name).map(Self::ReadOnly))
    }
}

impl From<ConfigSetting> for Setting {
    fn from(setting: ConfigSetting) -> Self {
        Self::Config(setting)
    }
}

impl From<ReadOnlySetting> for Setting {
    fn from(setting: ReadOnlySetting) -> Self {
        Self::ReadOnly(setting)
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
