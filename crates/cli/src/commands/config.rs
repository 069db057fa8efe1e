use anyhow::Result;
use clap::{Args, Subcommand};
use domain::config::PrediktorConfig;
use infrastructure::config::{ConfigLoader, ConfigValidator};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::render;

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Print or write an example configuration file
    #[command(alias = "gen")]
    Example {
        /// Write to this path instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the effective configuration
    #[command(alias = "check")]
    Validate,

    /// Show the effective configuration, API key masked
    Show,
}

impl ConfigCommand {
    pub async fn execute(&self, config: &PrediktorConfig) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Example { output, force } => {
                write_example(output.as_deref(), *force).await
            }
            ConfigSubcommand::Validate => {
                ConfigValidator::new().validate(config)?;
                println!("{}", render::success("Configuration valide"));
                Ok(())
            }
            ConfigSubcommand::Show => {
                println!("{}", toml::to_string_pretty(&masked(config))?);
                Ok(())
            }
        }
    }
}

async fn write_example(output: Option<&Path>, force: bool) -> Result<()> {
    let example = ConfigLoader::generate_example_config();
    let Some(path) = output else {
        println!("{example}");
        return Ok(());
    };

    if path.exists() && !force {
        warn!(path = %path.display(), "configuration file already exists");
        println!("{} existe déjà, utilisez --force pour l'écraser", path.display());
        return Ok(());
    }

    tokio::fs::write(path, example).await?;
    info!(path = %path.display(), "example configuration written");
    println!(
        "{}",
        render::success(&format!("Configuration écrite dans {}", path.display()))
    );
    Ok(())
}

/// Copy of the configuration safe to print
pub fn masked(config: &PrediktorConfig) -> PrediktorConfig {
    let mut shown = config.clone();
    if let Some(key) = shown.llm.api_key.as_mut() {
        let visible: String = key.chars().take(4).collect();
        *key = format!("{visible}****");
    }
    shown
}
