//! Fragment CLI commands
//!
//! Handles: phpenv-config add/rm/enable/disable/ls

use anyhow::Context;
use clap::Subcommand;
use phpconf_core::{ConfigError, ConfigManager, PhpenvEnv};
use std::path::PathBuf;

/// Fragment commands
#[derive(Subcommand, Debug)]
pub enum FragmentCommands {
    /// Copy an .ini file into the available store
    Add {
        /// Path to the .ini file
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Remove a config from the available store (and disable it)
    #[command(visible_alias = "remove")]
    Rm {
        /// Config name
        name: Option<String>,
    },
    /// Enable an available config
    #[command(visible_alias = "en")]
    Enable {
        /// Config name
        name: Option<String>,
    },
    /// Disable an enabled config
    #[command(visible_alias = "dis")]
    Disable {
        /// Config name
        name: Option<String>,
    },
    /// List enabled and available configs
    #[command(visible_alias = "list")]
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute a fragment command
pub fn execute(cmd: FragmentCommands, env: &PhpenvEnv) -> anyhow::Result<()> {
    let manager = ConfigManager::open(env)?;

    let outcome = match cmd {
        FragmentCommands::Add { file } => {
            manager.add(&file.ok_or(ConfigError::MissingArgument("file path"))?)?
        }
        FragmentCommands::Rm { name } => manager.remove(&require_name(name)?)?,
        FragmentCommands::Enable { name } => manager.enable(&require_name(name)?)?,
        FragmentCommands::Disable { name } => manager.disable(&require_name(name)?)?,
        FragmentCommands::Ls { json } => {
            let listing = manager.list()?;
            if json {
                let output = serde_json::to_string_pretty(&listing)
                    .context("failed to serialize listing")?;
                println!("{output}");
            } else {
                print!("{listing}");
            }
            return Ok(());
        }
    };

    println!("{outcome}");
    Ok(())
}

fn require_name(name: Option<String>) -> Result<String, ConfigError> {
    name.ok_or(ConfigError::MissingArgument("config name"))
}
