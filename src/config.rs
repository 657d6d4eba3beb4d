// file: src/config.rs
// version: 2.0.0
// guid: 6ea31d79-e2bf-4304-a841-22bf1e595512

use crate::error::{ChownError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const PROJECT_CONFIG_FILE: &str = ".dfs-chown.toml";
pub const CONFIG_ENV: &str = "DFS_CHOWN_CONFIG";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub namenode: NamenodeConfig,
    pub execution: ExecutionConfig,
    pub logging: LoggingConfig,
    /// Files the configuration was read from, lowest precedence first
    #[serde(skip)]
    pub sources: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamenodeConfig {
    /// Base URL of the namenode HTTP endpoint, e.g. `http://namenode:9870`
    pub url: String,
    /// User sent as `user.name` for simple authentication
    pub user: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Top-level paths dispatched at once
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for NamenodeConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9870".to_string(),
            user: None,
            timeout_seconds: 30,
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self { max_concurrency: 1 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namenode: NamenodeConfig::default(),
            execution: ExecutionConfig::default(),
            logging: LoggingConfig::default(),
            sources: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from multiple sources
    pub async fn load() -> Result<Self> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Try to load from user config directory
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                layers.push(Self::read_layer(&user_config).await?);
                sources.push(user_config);
            }
        }

        // Try to load from project config
        let project_config = Path::new(PROJECT_CONFIG_FILE);
        if project_config.exists() {
            layers.push(Self::read_layer(project_config).await?);
            sources.push(project_config.to_path_buf());
        }

        // Explicit file must exist
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            let explicit = PathBuf::from(explicit);
            layers.push(Self::read_layer(&explicit).await?);
            sources.push(explicit);
        }

        let mut config = Self::from_layers(layers)?;
        config.sources = sources;

        // Override with environment variables
        let config = Self::apply_env_overrides(config, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Get the user configuration file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dfs-chown").join("config.toml"))
    }

    async fn read_layer(path: &Path) -> Result<toml::Table> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            ChownError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str::<toml::Table>(&content).map_err(|e| {
            ChownError::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Merge layers in order, later layers winning key by key
    fn from_layers(layers: Vec<toml::Table>) -> Result<Self> {
        let mut merged = toml::Table::new();
        for layer in layers {
            merge_tables(&mut merged, layer);
        }

        toml::Value::Table(merged)
            .try_into::<Config>()
            .map_err(|e| ChownError::config(format!("Invalid configuration: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides<F>(mut config: Self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DFS_CHOWN_NAMENODE") {
            config.namenode.url = url;
        }

        if let Some(user) = lookup("DFS_CHOWN_USER").or_else(|| lookup("HADOOP_USER_NAME")) {
            config.namenode.user = Some(user);
        }

        if let Some(timeout) = lookup("DFS_CHOWN_TIMEOUT") {
            config.namenode.timeout_seconds = timeout.parse().map_err(|_| {
                ChownError::config(format!("DFS_CHOWN_TIMEOUT is not a number: {}", timeout))
            })?;
        }

        if let Some(concurrency) = lookup("DFS_CHOWN_CONCURRENCY") {
            config.execution.max_concurrency = concurrency.parse().map_err(|_| {
                ChownError::config(format!(
                    "DFS_CHOWN_CONCURRENCY is not a number: {}",
                    concurrency
                ))
            })?;
        }

        if let Some(level) = lookup("DFS_CHOWN_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.namenode.url).map_err(|e| {
            ChownError::config(format!("Invalid namenode url {}: {}", self.namenode.url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChownError::config(format!(
                "Namenode url must be http or https: {}",
                self.namenode.url
            )));
        }

        if self.namenode.timeout_seconds == 0 {
            return Err(ChownError::config("timeout_seconds must be at least 1"));
        }

        if self.execution.max_concurrency == 0 {
            return Err(ChownError::config("max_concurrency must be at least 1"));
        }

        Ok(())
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
