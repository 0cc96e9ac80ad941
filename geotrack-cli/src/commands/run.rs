//! Run command - track the current location on a map.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Args;
use geotrack::app::{AppConfig, GeoTrackApp};
use geotrack::config::{ConfigFile, ConfigKey, LocationSourceKind, PermissionMode};
use geotrack::logging::init_logging;
use geotrack::map::TileSource;
use geotrack::permission::{PermissionSystem, StaticPermissions};

use crate::error::CliError;
use crate::prompt::PromptPermissions;
use crate::tui_app::{run_headless, run_tui};

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Print location updates instead of drawing the map
    #[arg(long)]
    pub headless: bool,

    /// Location source: simulated or gpsd
    #[arg(long)]
    pub source: Option<LocationSourceKind>,

    /// gpsd host
    #[arg(long)]
    pub gpsd_host: Option<String>,

    /// gpsd port
    #[arg(long)]
    pub gpsd_port: Option<u16>,

    /// Permission answer: prompt, granted, coarse or deny
    #[arg(long)]
    pub permission: Option<PermissionMode>,

    /// Initial zoom level (0-19)
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Tile source: mapnik or opentopo
    #[arg(long)]
    pub tile_source: Option<TileSource>,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded file.
    fn apply(&self, mut config: ConfigFile) -> Result<ConfigFile, CliError> {
        if let Some(source) = self.source {
            config.location.source = source;
        }
        if let Some(ref host) = self.gpsd_host {
            ConfigKey::LocationGpsdHost.set(&mut config, host)?;
        }
        if let Some(port) = self.gpsd_port {
            config.location.gpsd_port = port;
        }
        if let Some(mode) = self.permission {
            config.permission.mode = mode;
        }
        if let Some(zoom) = self.zoom {
            ConfigKey::MapZoom.set(&mut config, &zoom.to_string())?;
        }
        if let Some(ref source) = self.tile_source {
            config.map.tile_source = source.clone();
        }
        Ok(config)
    }
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let config = args.apply(ConfigFile::load()?)?;

    let _log_guard = init_logging(
        &config.logging.resolved_directory(),
        &config.logging.level,
    )?;

    let interactive_stdin = atty::is(atty::Stream::Stdin);
    let use_tui = !args.headless && interactive_stdin && atty::is(atty::Stream::Stdout);

    let app_config = AppConfig::from_config_file(&config);
    let permissions = resolve_permissions(&app_config, interactive_stdin);

    println!(
        "{} {}",
        console::style("geotrack").cyan().bold(),
        geotrack::VERSION
    );
    println!("  Source:     {}", describe_source(&app_config));
    println!("  Tiles:      {}", app_config.map.tile_source);
    println!();

    let mut app = GeoTrackApp::start_sync(app_config, permissions)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let result = if use_tui {
        run_tui(&mut app, shutdown)
    } else {
        run_headless(&mut app, shutdown)
    };

    app.shutdown();
    result
}

/// Pick the permission system for the configured mode.
///
/// Without a terminal to ask on, `prompt` behaves like `deny`.
fn resolve_permissions(config: &AppConfig, interactive: bool) -> Arc<dyn PermissionSystem> {
    if let Some(system) = config.static_permissions() {
        return system;
    }
    if interactive {
        return Arc::new(PromptPermissions::new());
    }

    tracing::warn!("No terminal for the permission prompt, denying location access");
    eprintln!(
        "{} cannot ask for location permission without a terminal; \
         use --permission granted to allow it.",
        console::style("Warning:").yellow().bold()
    );
    Arc::new(StaticPermissions::deny_all())
}

fn describe_source(config: &AppConfig) -> String {
    match config.location.source {
        LocationSourceKind::Simulated => "simulated walk".to_string(),
        LocationSourceKind::Gpsd => format!(
            "gpsd at {}:{}",
            config.location.gpsd_host, config.location.gpsd_port
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            headless: true,
            source: None,
            gpsd_host: None,
            gpsd_port: None,
            permission: None,
            zoom: None,
            tile_source: None,
        }
    }

    #[test]
    fn test_no_flags_keep_file_values() {
        let mut file = ConfigFile::default();
        file.location.gpsd_port = 4000;
        let applied = args().apply(file.clone()).unwrap();
        assert_eq!(applied, file);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = ConfigFile::default();
        file.permission.mode = PermissionMode::Deny;

        let args = RunArgs {
            source: Some(LocationSourceKind::Gpsd),
            gpsd_host: Some("gps.local".to_string()),
            permission: Some(PermissionMode::Granted),
            zoom: Some(11.0),
            tile_source: Some(TileSource::open_topo()),
            ..args()
        };
        let applied = args.apply(file).unwrap();

        assert_eq!(applied.location.source, LocationSourceKind::Gpsd);
        assert_eq!(applied.location.gpsd_host, "gps.local");
        assert_eq!(applied.permission.mode, PermissionMode::Granted);
        assert_eq!(applied.map.zoom, 11.0);
        assert_eq!(applied.map.tile_source, TileSource::open_topo());
    }

    #[test]
    fn test_out_of_range_zoom_rejected() {
        let args = RunArgs {
            zoom: Some(42.0),
            ..args()
        };
        assert!(args.apply(ConfigFile::default()).is_err());
    }

    #[test]
    fn test_prompt_without_terminal_denies() {
        let config = AppConfig::default();
        let system = resolve_permissions(&config, false);
        assert_eq!(
            system.check(geotrack::permission::Permission::FineLocation),
            geotrack::permission::PermissionStatus::Denied
        );
    }

    #[test]
    fn test_describe_gpsd_source() {
        let file = RunArgs {
            source: Some(LocationSourceKind::Gpsd),
            ..args()
        }
        .apply(ConfigFile::default())
        .unwrap();
        let config = AppConfig::from_config_file(&file);
        assert_eq!(describe_source(&config), "gpsd at localhost:2947");
    }
}
