use anyhow::{bail, Result};
use domain::config::{ExportConfig, LlmConfig, LoggingConfig, PrediktorConfig, StorageConfig};
use tracing::warn;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &PrediktorConfig) -> Result<()> {
        self.validate_llm_config(&config.llm)?;
        self.validate_storage_config(&config.storage)?;
        self.validate_logging_config(&config.logging)?;
        self.validate_export_config(&config.export)?;
        Ok(())
    }

    fn validate_llm_config(&self, config: &LlmConfig) -> Result<()> {
        if config.api_key.is_none() {
            warn!("Generative API key is missing; analyses will fall back to demo data");
        }

        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            bail!("API base URL must be http(s), got '{}'", config.base_url);
        }

        if config.model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        if !(0.0..=2.0).contains(&config.temperature) {
            bail!(
                "Temperature must be between 0.0 and 2.0, got {}",
                config.temperature
            );
        }

        if config.top_p <= 0.0 || config.top_p > 1.0 {
            bail!("top_p must be in (0.0, 1.0], got {}", config.top_p);
        }

        if config.top_k == 0 {
            bail!("top_k must be greater than 0");
        }

        if config.max_output_tokens == 0 {
            bail!("max_output_tokens must be greater than 0");
        }

        Ok(())
    }

    fn validate_storage_config(&self, config: &StorageConfig) -> Result<()> {
        if config.pool_size == 0 {
            bail!("Storage pool size must be greater than 0");
        }

        if let Some(path) = &config.database_path {
            if path.is_dir() {
                bail!("Database path is a directory: {}", path.display());
            }
        }

        Ok(())
    }

    fn validate_logging_config(&self, config: &LoggingConfig) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: {:?}",
                config.level,
                valid_levels
            );
        }
        Ok(())
    }

    fn validate_export_config(&self, config: &ExportConfig) -> Result<()> {
        if config.output_dir.is_file() {
            bail!(
                "Export directory is an existing file: {}",
                config.output_dir.display()
            );
        }
        if !config.output_dir.exists() {
            warn!(
                "Export directory does not exist yet and will be created: {}",
                config.output_dir.display()
            );
        }
        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
