//! Addressable configuration keys.
//!
//! Each key is written `section.key` (for example `location.gpsd_port`) and
//! is used by the `config get` / `config set` / `config list` commands as
//! well as by the INI reader and writer.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::file::{ConfigError, ConfigFile};
use crate::coord::{Coordinate, MAX_ZOOM, MIN_ZOOM};
use crate::location::Priority;
use crate::map::TileSource;

/// A single configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    LocationSource,
    LocationIntervalMs,
    LocationMinIntervalMs,
    LocationPriority,
    LocationGpsdHost,
    LocationGpsdPort,
    MapZoom,
    MapTileSource,
    MapFallbackLatitude,
    MapFallbackLongitude,
    PermissionMode,
    LoggingDirectory,
    LoggingLevel,
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::LocationSource,
            ConfigKey::LocationIntervalMs,
            ConfigKey::LocationMinIntervalMs,
            ConfigKey::LocationPriority,
            ConfigKey::LocationGpsdHost,
            ConfigKey::LocationGpsdPort,
            ConfigKey::MapZoom,
            ConfigKey::MapTileSource,
            ConfigKey::MapFallbackLatitude,
            ConfigKey::MapFallbackLongitude,
            ConfigKey::PermissionMode,
            ConfigKey::LoggingDirectory,
            ConfigKey::LoggingLevel,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::LocationSource
            | ConfigKey::LocationIntervalMs
            | ConfigKey::LocationMinIntervalMs
            | ConfigKey::LocationPriority
            | ConfigKey::LocationGpsdHost
            | ConfigKey::LocationGpsdPort => "location",
            ConfigKey::MapZoom
            | ConfigKey::MapTileSource
            | ConfigKey::MapFallbackLatitude
            | ConfigKey::MapFallbackLongitude => "map",
            ConfigKey::PermissionMode => "permission",
            ConfigKey::LoggingDirectory | ConfigKey::LoggingLevel => "logging",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::LocationSource => "source",
            ConfigKey::LocationIntervalMs => "interval_ms",
            ConfigKey::LocationMinIntervalMs => "min_interval_ms",
            ConfigKey::LocationPriority => "priority",
            ConfigKey::LocationGpsdHost => "gpsd_host",
            ConfigKey::LocationGpsdPort => "gpsd_port",
            ConfigKey::MapZoom => "zoom",
            ConfigKey::MapTileSource => "tile_source",
            ConfigKey::MapFallbackLatitude => "fallback_latitude",
            ConfigKey::MapFallbackLongitude => "fallback_longitude",
            ConfigKey::PermissionMode => "mode",
            ConfigKey::LoggingDirectory => "directory",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::LocationSource => config.location.source.to_string(),
            ConfigKey::LocationIntervalMs => config.location.interval.as_millis().to_string(),
            ConfigKey::LocationMinIntervalMs => {
                config.location.min_interval.as_millis().to_string()
            }
            ConfigKey::LocationPriority => config.location.priority.to_string(),
            ConfigKey::LocationGpsdHost => config.location.gpsd_host.clone(),
            ConfigKey::LocationGpsdPort => config.location.gpsd_port.to_string(),
            ConfigKey::MapZoom => config.map.zoom.to_string(),
            ConfigKey::MapTileSource => config.map.tile_source.name().to_lowercase(),
            ConfigKey::MapFallbackLatitude => config.map.fallback.latitude.to_string(),
            ConfigKey::MapFallbackLongitude => config.map.fallback.longitude.to_string(),
            ConfigKey::PermissionMode => config.permission.mode.to_string(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Validate `value` and store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason,
        };

        match self {
            ConfigKey::LocationSource => {
                config.location.source = value.parse().map_err(invalid)?;
            }
            ConfigKey::LocationIntervalMs => {
                let ms = parse_positive_ms(value).map_err(invalid)?;
                config.location.interval = ms;
            }
            ConfigKey::LocationMinIntervalMs => {
                let ms = parse_positive_ms(value).map_err(invalid)?;
                config.location.min_interval = ms;
            }
            ConfigKey::LocationPriority => {
                config.location.priority = value
                    .parse::<Priority>()
                    .map_err(|e| invalid(e.to_string()))?;
            }
            ConfigKey::LocationGpsdHost => {
                let host = value.trim();
                if host.is_empty() {
                    return Err(invalid("host must not be empty".to_string()));
                }
                config.location.gpsd_host = host.to_string();
            }
            ConfigKey::LocationGpsdPort => {
                config.location.gpsd_port = value
                    .trim()
                    .parse::<u16>()
                    .map_err(|e| invalid(e.to_string()))?;
            }
            ConfigKey::MapZoom => {
                let zoom = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| invalid(e.to_string()))?;
                if !(MIN_ZOOM as f64..=MAX_ZOOM as f64).contains(&zoom) {
                    return Err(invalid(format!(
                        "zoom must be between {} and {}",
                        MIN_ZOOM, MAX_ZOOM
                    )));
                }
                config.map.zoom = zoom;
            }
            ConfigKey::MapTileSource => {
                config.map.tile_source = value.parse::<TileSource>().map_err(invalid)?;
            }
            ConfigKey::MapFallbackLatitude => {
                let lat = parse_f64(value).map_err(invalid)?;
                let checked = Coordinate::checked(lat, config.map.fallback.longitude)
                    .map_err(|e| invalid(e.to_string()))?;
                config.map.fallback = checked;
            }
            ConfigKey::MapFallbackLongitude => {
                let lon = parse_f64(value).map_err(invalid)?;
                let checked = Coordinate::checked(config.map.fallback.latitude, lon)
                    .map_err(|e| invalid(e.to_string()))?;
                config.map.fallback = checked;
            }
            ConfigKey::PermissionMode => {
                config.permission.mode = value.parse().map_err(invalid)?;
            }
            ConfigKey::LoggingDirectory => {
                let dir = value.trim();
                config.logging.directory = if dir.is_empty() {
                    None
                } else {
                    Some(expand_tilde(dir))
                };
            }
            ConfigKey::LoggingLevel => {
                let level = value.trim().to_lowercase();
                if !matches!(
                    level.as_str(),
                    "trace" | "debug" | "info" | "warn" | "error"
                ) {
                    return Err(invalid(
                        "expected trace, debug, info, warn or error".to_string(),
                    ));
                }
                config.logging.level = level;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

fn parse_positive_ms(value: &str) -> Result<Duration, String> {
    let ms = value.trim().parse::<u64>().map_err(|e| e.to_string())?;
    if ms == 0 {
        return Err("must be greater than zero".to_string());
    }
    Ok(Duration::from_millis(ms))
}

fn parse_f64(value: &str) -> Result<f64, String> {
    value.trim().parse::<f64>().map_err(|e| e.to_string())
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
