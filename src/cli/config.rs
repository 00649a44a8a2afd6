//! Manage the global configuration file.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use super::CliConfig;
use crate::config::GlobalConfig;

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommands {
    /// Write a configuration file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (the default)
    Show,

    /// Set a network setting, e.g. `ctxdocs config set api_key ctx7sk-...`
    Set {
        /// docs_url, registry_url, api_key, max_concurrency, or timeout_ms
        key: String,

        value: String,
    },

    /// Print the configuration file location
    Path,
}

impl ConfigCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let path = match &config.config_path {
            Some(path) => path.clone(),
            None => GlobalConfig::default_path()?,
        };

        match self.command {
            Some(ConfigSubcommands::Init {
                force,
            }) => init(path, force).await,
            Some(ConfigSubcommands::Show) | None => show(path).await,
            Some(ConfigSubcommands::Set {
                key,
                value,
            }) => set(path, &key, &value).await,
            Some(ConfigSubcommands::Path) => {
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

async fn init(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("{} Global config already exists at {}", "!".yellow(), path.display());
        println!("  Use --force to overwrite");
        return Ok(());
    }

    GlobalConfig::default().save_to(&path).await?;
    println!("{} Created global config at {}", "✓".green(), path.display());
    println!("\n{}", "Next steps:".cyan());
    println!("  Set your documentation API key with {}", "ctxdocs config set api_key <KEY>".bright_white());
    Ok(())
}

async fn show(path: PathBuf) -> Result<()> {
    let global = GlobalConfig::load_with_optional(Some(path.clone())).await?;
    let display = GlobalConfig {
        network: global.network.redacted(),
    };

    println!("{}", "Global Configuration".bold());
    if path.exists() {
        println!("Location: {}\n", path.display());
    } else {
        println!("Location: {} {}\n", path.display(), "(not created, showing defaults)".bright_black());
    }
    println!("{}", toml::to_string_pretty(&display)?);
    Ok(())
}

async fn set(path: PathBuf, key: &str, value: &str) -> Result<()> {
    let mut global = GlobalConfig::load_with_optional(Some(path.clone())).await?;
    global.network.set(key, value)?;
    global.save_to(&path).await?;

    let shown = if key == "api_key" && !value.is_empty() {
        "********"
    } else {
        value
    };
    println!("{} Set {} = {} in {}", "✓".green(), key, shown, path.display());
    Ok(())
}
