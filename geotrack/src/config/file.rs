//! INI configuration file.
//!
//! ```ini
//! [location]
//! source = simulated
//! interval_ms = 5000
//! min_interval_ms = 2000
//! priority = high_accuracy
//! gpsd_host = localhost
//! gpsd_port = 2947
//!
//! [map]
//! zoom = 15
//! tile_source = mapnik
//! fallback_latitude = 14.5995
//! fallback_longitude = 120.9842
//!
//! [permission]
//! mode = prompt
//!
//! [logging]
//! directory = ~/.geotrack/logs
//! level = info
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::coord::{Coordinate, FALLBACK_LOCATION};
use crate::location::{
    LocationRequest, Priority, DEFAULT_GPSD_HOST, DEFAULT_GPSD_PORT, DEFAULT_INTERVAL,
    DEFAULT_MIN_UPDATE_INTERVAL,
};
use crate::map::{MapViewConfig, TileSource, DEFAULT_ZOOM};

/// Directory under the home directory holding config and logs.
pub const CONFIG_DIR_NAME: &str = ".geotrack";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors reading, writing or editing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// Where location fixes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationSourceKind {
    /// Synthetic walk, no hardware needed.
    #[default]
    Simulated,
    /// A gpsd daemon over TCP.
    Gpsd,
}

impl LocationSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationSourceKind::Simulated => "simulated",
            LocationSourceKind::Gpsd => "gpsd",
        }
    }
}

impl fmt::Display for LocationSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" | "sim" => Ok(LocationSourceKind::Simulated),
            "gpsd" => Ok(LocationSourceKind::Gpsd),
            other => Err(format!(
                "unknown location source '{}' (expected simulated or gpsd)",
                other
            )),
        }
    }
}

/// How the permission request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionMode {
    /// Ask the user interactively.
    #[default]
    Prompt,
    /// Precise access already held.
    Granted,
    /// Only approximate access is granted on request.
    Coarse,
    /// Every request is refused.
    Deny,
}

impl PermissionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionMode::Prompt => "prompt",
            PermissionMode::Granted => "granted",
            PermissionMode::Coarse => "coarse",
            PermissionMode::Deny => "deny",
        }
    }
}

impl fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prompt" | "ask" => Ok(PermissionMode::Prompt),
            "granted" | "grant" | "fine" => Ok(PermissionMode::Granted),
            "coarse" => Ok(PermissionMode::Coarse),
            "deny" | "denied" => Ok(PermissionMode::Deny),
            other => Err(format!(
                "unknown permission mode '{}' (expected prompt, granted, coarse or deny)",
                other
            )),
        }
    }
}

/// `[location]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    pub source: LocationSourceKind,
    pub interval: Duration,
    pub min_interval: Duration,
    pub priority: Priority,
    pub gpsd_host: String,
    pub gpsd_port: u16,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            source: LocationSourceKind::default(),
            interval: DEFAULT_INTERVAL,
            min_interval: DEFAULT_MIN_UPDATE_INTERVAL,
            priority: Priority::default(),
            gpsd_host: DEFAULT_GPSD_HOST.to_string(),
            gpsd_port: DEFAULT_GPSD_PORT,
        }
    }
}

impl LocationSettings {
    /// Subscription parameters described by these settings.
    pub fn request(&self) -> LocationRequest {
        LocationRequest::new(self.priority, self.interval)
            .with_min_update_interval(self.min_interval)
    }
}

/// `[map]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub zoom: f64,
    pub tile_source: TileSource,
    pub fallback: Coordinate,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_source: TileSource::default(),
            fallback: FALLBACK_LOCATION,
        }
    }
}

impl MapSettings {
    pub fn view_config(&self) -> MapViewConfig {
        MapViewConfig {
            tile_source: self.tile_source.clone(),
            zoom: self.zoom,
            fallback: self.fallback,
            ..MapViewConfig::default()
        }
    }
}

/// `[permission]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSettings {
    pub mode: PermissionMode,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log directory; `None` means `~/.geotrack/logs`.
    pub directory: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Configured directory, or the default one.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_log_directory)
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub location: LocationSettings,
    pub map: MapSettings,
    pub permission: PermissionSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default path. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in super::ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                let value = value.trim();
                if !value.is_empty() {
                    key.set(&mut config, value)?;
                }
            }
        }
        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in super::ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }
}

/// `~/.geotrack`, or `./.geotrack` when no home directory is known.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// `~/.geotrack/config.ini`.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// `~/.geotrack/logs`.
pub fn default_log_directory() -> PathBuf {
    config_directory().join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.location.source, LocationSourceKind::Simulated);
        assert_eq!(config.location.interval, Duration::from_millis(5000));
        assert_eq!(config.location.min_interval, Duration::from_millis(2000));
        assert_eq!(config.location.gpsd_port, 2947);
        assert_eq!(config.map.zoom, 15.0);
        assert_eq!(config.map.fallback, Coordinate::new(14.5995, 120.9842));
        assert_eq!(config.permission.mode, PermissionMode::Prompt);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.location.source = LocationSourceKind::Gpsd;
        config.location.gpsd_host = "gps.local".to_string();
        config.map.tile_source = TileSource::open_topo();
        config.permission.mode = PermissionMode::Coarse;
        config.logging.directory = Some(dir.path().join("logs"));
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[map]\nzoom = 12\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.map.zoom, 12.0);
        assert_eq!(config.location, LocationSettings::default());
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[location]\ngpsd_port = lots\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_request_from_settings() {
        let settings = LocationSettings {
            interval: Duration::from_secs(10),
            min_interval: Duration::from_secs(3),
            ..LocationSettings::default()
        };
        let request = settings.request();
        assert_eq!(request.interval(), Duration::from_secs(10));
        assert_eq!(request.min_update_interval(), Duration::from_secs(3));
    }
}
