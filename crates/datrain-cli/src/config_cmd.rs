//! `onedrive-sync config` subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use datrain_config::{log_cli_info, Config, PROJECT_CONFIG_PATH};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print where config files are read from
    Path,
    /// Write the default configuration to the global config path
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub fn cmd_config(command: ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", config.to_toml());
            Ok(())
        }
        ConfigCommands::Path => {
            match Config::global_config_path() {
                Some(global) => println!("Global: {}", global.display()),
                None => println!("Global: (home directory unknown)"),
            }
            println!("Project: {}", Path::new(PROJECT_CONFIG_PATH).display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = Config::global_config_path()
                .context("Cannot determine home directory for the global config")?;
            init_config(&path, force)?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
    }
}

/// Write the default config to `path`, refusing to clobber unless `force`.
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log_cli_info!("Config initialized", path = tracing::field::display(path.display()));
    Ok(())
}
