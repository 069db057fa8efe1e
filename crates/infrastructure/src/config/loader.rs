use anyhow::{Context, Result};
use domain::config::{PrediktorConfig, Profile};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info, warn};

/// Where a piece of the effective configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Environment(String),
    Default,
}

/// Unprefixed key honoured after `<prefix>GEMINI_API_KEY`
const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "PREDIKTOR_".to_string(),
        }
    }

    /// Checked before the default locations
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.config_paths.insert(0, path);
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("prediktor.toml"),
            PathBuf::from("prediktor.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("prediktor").join("config.toml"));
            paths.push(config_dir.join("prediktor").join("config.json"));
        }

        paths
    }

    pub async fn load(&self) -> Result<PrediktorConfig> {
        self.load_with_sources().await.map(|(config, _)| config)
    }

    /// Defaults, then the first config file found, then the environment.
    /// Later layers win.
    pub async fn load_with_sources(&self) -> Result<(PrediktorConfig, Vec<ConfigSource>)> {
        let mut sources = vec![ConfigSource::Default];
        let mut config = PrediktorConfig::default();

        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }
            match self.load_file(path).await {
                Ok(file_config) => {
                    info!("Loaded configuration from: {}", path.display());
                    config = file_config;
                    sources.push(ConfigSource::File(path.clone()));
                    break;
                }
                Err(e) => {
                    warn!("Failed to load config from {}: {:#}", path.display(), e);
                }
            }
        }

        if let Some(profile) = self.detect_profile() {
            debug!("Profile from environment: {}", profile.name());
            config.profile = profile;
            sources.push(ConfigSource::Environment(self.env_key("ENV")));
        }
        config.apply_profile();

        sources.extend(self.apply_env_overrides(&mut config));
        Ok((config, sources))
    }

    /// Profile named by `<prefix>ENV`; unknown names are ignored
    pub fn detect_profile(&self) -> Option<Profile> {
        let value = self.var("ENV")?;
        match Profile::from_str(&value) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("Ignoring {}ENV: {}", self.env_prefix, e);
                None
            }
        }
    }

    fn env_key(&self, key: &str) -> String {
        format!("{}{key}", self.env_prefix)
    }

    fn var(&self, key: &str) -> Option<String> {
        env::var(self.env_key(key))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    async fn load_file(&self, path: &Path) -> Result<PrediktorConfig> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" | "" => toml::from_str(&content).context("Failed to parse TOML config"),
            "json" => serde_json::from_str(&content).context("Failed to parse JSON config"),
            _ => toml::from_str(&content)
                .or_else(|_| serde_json::from_str(&content))
                .context("Failed to parse config file"),
        }
    }

    fn apply_env_overrides(&self, config: &mut PrediktorConfig) -> Vec<ConfigSource> {
        let mut applied = Vec::new();
        let mut note = |name: String| applied.push(ConfigSource::Environment(name));

        // Generative API
        if let Some(api_key) = self.var(GEMINI_API_KEY) {
            config.llm.api_key = Some(api_key);
            note(self.env_key(GEMINI_API_KEY));
        } else if let Ok(api_key) = env::var(GEMINI_API_KEY) {
            if !api_key.trim().is_empty() {
                config.llm.api_key = Some(api_key);
                note(GEMINI_API_KEY.to_string());
            }
        }

        if let Some(model) = self.var("MODEL") {
            config.llm.model = model;
            note(self.env_key("MODEL"));
        }

        if let Some(base_url) = self.var("API_BASE") {
            config.llm.base_url = base_url;
            note(self.env_key("API_BASE"));
        }

        if let Some(temperature) = self.var("TEMPERATURE") {
            match temperature.parse() {
                Ok(value) => {
                    config.llm.temperature = value;
                    note(self.env_key("TEMPERATURE"));
                }
                Err(_) => warn!("Ignoring non-numeric {}TEMPERATURE", self.env_prefix),
            }
        }

        // Storage
        if let Some(path) = self.var("DB_PATH") {
            config.storage.database_path = Some(PathBuf::from(path));
            note(self.env_key("DB_PATH"));
        }

        if let Some(size) = self.var("POOL_SIZE") {
            match size.parse() {
                Ok(value) => {
                    config.storage.pool_size = value;
                    note(self.env_key("POOL_SIZE"));
                }
                Err(_) => warn!("Ignoring non-numeric {}POOL_SIZE", self.env_prefix),
            }
        }

        // Logging
        if let Some(level) = self.var("LOG_LEVEL") {
            config.logging.level = level;
            note(self.env_key("LOG_LEVEL"));
        }

        if let Some(json) = self.var("LOG_JSON") {
            config.logging.structured =
                matches!(json.to_lowercase().as_str(), "1" | "true" | "yes");
            note(self.env_key("LOG_JSON"));
        }

        // Export
        if let Some(dir) = self.var("EXPORT_DIR") {
            config.export.output_dir = PathBuf::from(dir);
            note(self.env_key("EXPORT_DIR"));
        }

        applied
    }

    pub async fn save_config(&self, config: &PrediktorConfig, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");

        let content = match extension {
            "json" => serde_json::to_string_pretty(config)?,
            _ => toml::to_string_pretty(config)?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, content).await?;
        info!("Configuration saved to: {}", path.display());

        Ok(())
    }

    pub fn generate_example_config() -> String {
        let mut config = PrediktorConfig::default();
        config.llm.api_key = Some("your-gemini-api-key".to_string());
        config.storage.database_path = Some(PathBuf::from("./data/prediktor.db"));
        config.export.output_dir = PathBuf::from("./exports");

        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| "Failed to generate example config".to_string())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
