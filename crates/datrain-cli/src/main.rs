//! # onedrive-sync
//!
//! Drops a marker file into the local OneDrive folder so the OneDrive client
//! syncs it. Running with no arguments performs the marker write.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use datrain_config::logging::{init_logging, LogLevel};
use datrain_config::{log_cli_debug, Config};

mod cache;
mod config_cmd;
mod doctor;
mod marker;

use config_cmd::ConfigCommands;

/// DatRain OneDrive sync - write a marker into OneDrive for the client to upload
#[derive(Parser)]
#[command(name = "onedrive-sync")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sync marker file (default when no command is given)
    Marker,

    /// Copy the files of a directory into the OneDrive folder
    Cache {
        /// Source directory (defaults to cache.source_dir)
        #[arg(value_name = "DIR")]
        source: Option<PathBuf>,
    },

    /// Check the local OneDrive setup
    Doctor,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config is read before logging exists; report a bad file once logging is up.
    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let level = config.log.level.parse::<LogLevel>();
    init_logging(*level.as_ref().unwrap_or(&LogLevel::Warn));

    if let Some(e) = config_err {
        tracing::warn!("Ignoring config: {}", e);
    }
    if let Err(e) = level {
        tracing::warn!("Ignoring log.level, using warn: {}", e);
    }

    match cli.command.unwrap_or(Commands::Marker) {
        Commands::Marker => {
            log_cli_debug!("Dispatching", command = "marker");
            marker::run()?;
        }
        Commands::Cache { source } => {
            log_cli_debug!("Dispatching", command = "cache");
            let source = source.unwrap_or_else(|| config.cache.source_dir.clone());
            let report = cache::run(&source)?;
            println!(
                "{} copied, {} skipped, {} failed",
                report.copied, report.skipped, report.failed
            );
            if report.failed > 0 {
                anyhow::bail!("{} file(s) failed to copy", report.failed);
            }
        }
        Commands::Doctor => doctor::cmd_doctor()?,
        Commands::Config { command } => config_cmd::cmd_config(command, &config)?,
    }

    Ok(())
}
