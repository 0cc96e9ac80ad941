//! geotrack CLI - live GPS position on a terminal map
//!
//! ```text
//! geotrack run [--headless] [--source simulated|gpsd] [--permission MODE] ...
//! geotrack config get|set|list|path
//! geotrack init
//! ```

mod commands;
mod error;
mod prompt;
mod tui_app;
mod ui;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::run::RunArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "geotrack", version, about = "Show the current GPS position on a map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Track the current location on a map
    Run(RunArgs),

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Create the configuration file with defaults
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Config { command } => commands::config::run(command),
        Commands::Init => commands::init::run(),
    }
}
