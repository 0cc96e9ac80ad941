//! Application configuration.
//!
//! `AppConfig` is what [`GeoTrackApp`](super::GeoTrackApp) is started with:
//! the settings file with command-line overrides already applied.

use std::sync::Arc;

use crate::config::{ConfigFile, LocationSettings, PermissionMode};
use crate::location::SimulatedConfig;
use crate::map::MapViewConfig;
use crate::permission::{AccessLevel, PermissionSystem, StaticPermissions};

/// Everything needed to bring up the tracker.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub location: LocationSettings,
    pub map: MapViewConfig,
    pub permission: PermissionMode,
    /// Walk parameters when the simulated source is used.
    pub simulation: SimulatedConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_config_file(&ConfigFile::default())
    }
}

impl AppConfig {
    /// Build from a loaded configuration file.
    ///
    /// The simulated walk starts at the map's fallback center.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        let map = config.map.view_config();
        let simulation = SimulatedConfig {
            start: map.fallback,
            ..SimulatedConfig::default()
        };
        Self {
            location: config.location.clone(),
            map,
            permission: config.permission.mode,
            simulation,
        }
    }

    /// Non-interactive permission system for the configured mode.
    ///
    /// `Prompt` has none; the front end supplies its own.
    pub fn static_permissions(&self) -> Option<Arc<dyn PermissionSystem>> {
        let system = match self.permission {
            PermissionMode::Prompt => return None,
            PermissionMode::Granted => StaticPermissions::already_granted(),
            PermissionMode::Coarse => StaticPermissions::grant_on_request(AccessLevel::Coarse),
            PermissionMode::Deny => StaticPermissions::deny_all(),
        };
        Some(Arc::new(system))
    }
}
