//! Configuration module for the camera tether tool
//!
//! Supports loading configuration from a TOML file.
//! Configuration is stored in a standard location:
//! - Windows: %APPDATA%\camera_tether_tool\config.toml
//! - Linux/macOS: ~/.config/camera_tether_tool/config.toml

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::camera::CameraOptions;
use crate::core::formatter::{FilenameFormatter, DEFAULT_RENAME_RULE};

/// Application name used for the config directory
const APP_NAME: &str = "camera_tether_tool";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading or writing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No standard configuration directory could be determined
    #[error("could not determine a configuration directory")]
    ConfigDirNotFound,

    /// The config file could not be read
    #[error("failed to read {0}: {1}")]
    ReadError(PathBuf, String),

    /// The config file is not valid TOML for this tool
    #[error("failed to parse {0}: {1}")]
    ParseError(PathBuf, String),

    /// The config file or directory could not be written
    #[error("failed to write {0}: {1}")]
    WriteError(PathBuf, String),
}

/// Get the standard configuration directory for the application.
///
/// Returns:
/// - Windows: %APPDATA%\camera_tether_tool
/// - Linux/macOS: ~/.config/camera_tether_tool
pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join(APP_NAME))
    }
}

/// Get the standard configuration file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Ensure the configuration directory exists.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = get_config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::WriteError(config_dir.clone(), e.to_string()))?;
    }

    Ok(config_dir)
}

/// Initialize the configuration file if it doesn't exist.
///
/// Creates the config directory and writes the default config template.
/// Returns the path to the config file.
pub fn init_config() -> Result<PathBuf, ConfigError> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        fs::write(&config_path, Config::generate_default_config())
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e.to_string()))?;
    }

    Ok(config_path)
}

/// Capture behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureConfig {
    /// Directory captured files are placed in (current directory if unset)
    pub directory: Option<PathBuf>,
    /// Push option-model steps to the device only at capture time
    pub apply_on_capture: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            directory: None,
            apply_on_capture: true,
        }
    }
}

/// Filename naming rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NamingConfig {
    /// Rename rule applied to every captured file
    pub rename_rule: String,
    /// Initial value of the sequence counter
    pub initial_seq: u64,
    /// Value of the `{text}` / `{custom_text}` placeholder
    pub custom_text: String,
    /// Additional user-defined substitution keys
    pub keys: HashMap<String, String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            rename_rule: DEFAULT_RENAME_RULE.to_string(),
            initial_seq: 0,
            custom_text: String::new(),
            keys: HashMap::new(),
        }
    }
}

impl NamingConfig {
    /// Build a filename formatter configured from this section
    pub fn build_formatter(&self) -> FilenameFormatter {
        let mut formatter = FilenameFormatter::new()
            .with_rule(self.rename_rule.as_str())
            .with_initial(self.initial_seq)
            .with_text(self.custom_text.as_str());
        formatter.add_keys(self.keys.iter().map(|(k, v)| (k.clone(), v.clone())));
        formatter
    }
}

/// Logging behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub naming: NamingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Load configuration from the standard location
    ///
    /// A missing file is not an error: defaults are returned.
    pub fn load_default() -> Result<Self, ConfigError> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Camera facade options derived from this configuration
    pub fn camera_options(&self) -> CameraOptions {
        CameraOptions {
            apply_on_capture: self.capture.apply_on_capture,
            capture_directory: self.capture.directory.clone(),
        }
    }

    /// Generate the default configuration file contents
    pub fn generate_default_config() -> String {
        format!(
            r#"# Camera tether tool configuration

[capture]
# Directory captured files are placed in. Unset = current directory.
# directory = "/photos/session"
# Push option-model steps to the device only at capture time (true),
# or immediately on every step (false).
apply_on_capture = true

[naming]
# Rename rule applied to every captured file. Placeholders:
# {{text}} {{YYYY}} {{YY}} {{MM}} {{mon}} {{month}} {{DD}} {{seq:0N}}
# {{original}} {{filename}} {{ext}} {{EXT}}
rename_rule = "{DEFAULT_RENAME_RULE}"
# Initial value of the sequence counter.
initial_seq = 0
# Value of the {{text}} placeholder.
custom_text = ""

# Additional user-defined substitution keys.
[naming.keys]
# camera = "ILCE-7M3"

[logging]
# Log level: error, warn, info, debug, trace
level = "info"
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_generated_template_parses_to_defaults() {
        let config: Config = toml::from_str(&Config::generate_default_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[capture]
directory = "/photos"
apply_on_capture = false

[naming]
rename_rule = "{{YYYY}}{{MM}}{{DD}}_{{seq:04}}.{{ext}}"
initial_seq = 100
custom_text = "studio"

[naming.keys]
camera = "ILCE-7M3"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.capture.directory, Some(PathBuf::from("/photos")));
        assert!(!config.capture.apply_on_capture);
        assert_eq!(config.naming.initial_seq, 100);
        assert_eq!(config.naming.keys.get("camera"), Some(&"ILCE-7M3".to_string()));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[naming]\nrename_rule = \"{seq}.jpg\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.naming.rename_rule, "{seq}.jpg");
        assert!(config.capture.apply_on_capture);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not toml at all [").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::ParseError(_, _))
        ));
    }

    #[test]
    fn test_build_formatter_applies_naming_section() {
        let naming = NamingConfig {
            rename_rule: "{text}_{camera}_{seq:03}.{ext}".to_string(),
            initial_seq: 7,
            custom_text: "studio".to_string(),
            keys: HashMap::from([("camera".to_string(), "ILCE-7M3".to_string())]),
        };

        let mut formatter = naming.build_formatter();
        assert_eq!(
            formatter.get_filename("shot.arw").unwrap(),
            "studio_ILCE-7M3_008.arw"
        );
    }
}
