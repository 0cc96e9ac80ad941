//! User configuration.
//!
//! Settings live in `~/.geotrack/config.ini`. A missing file is not an
//! error; defaults apply. Command-line flags override whatever is loaded
//! here.

mod file;
mod keys;

pub use file::{
    config_directory, config_file_path, default_log_directory, ConfigError, ConfigFile,
    LocationSettings, LocationSourceKind, LoggingSettings, MapSettings, PermissionMode,
    PermissionSettings, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
pub use keys::ConfigKey;
