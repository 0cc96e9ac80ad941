//! Init command - create the configuration file.

use std::path::Path;

use geotrack::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();
    let created = init_at(&path)?;

    if created {
        println!("Created configuration file: {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
    }
    println!();
    println!("Edit this file or use 'geotrack config set' to customize settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

/// Write `path` with current values (defaults for anything unset).
///
/// Returns `true` if the file did not exist before. An existing file is
/// rewritten with every key filled in.
fn init_at(path: &Path) -> Result<bool, CliError> {
    let existed = path.exists();
    let config = ConfigFile::load_from(path)?;
    config.save_to(path)?;
    Ok(!existed)
}
