use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_USER_ID: &str = "default";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the `<key>.json` collection files
    pub data_dir: ConfigValue<PathBuf>,
    /// Base URL of the recipe/product API
    pub api_url: ConfigValue<String>,
    /// Owner recorded on new meal plans
    pub user_id: ConfigValue<String>,
    /// Log filter used when RUST_LOG is not set
    pub log_level: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    api_url: Option<String>,
    user_id: Option<String>,
    log_level: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut user_id = ConfigValue::new(DEFAULT_USER_ID.to_string(), ConfigSource::Default);
        let mut log_level = ConfigValue::new(DEFAULT_LOG_LEVEL.to_string(), ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                data_dir = ConfigValue::new(resolve_relative(&path, dir), ConfigSource::File);
            }
            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(user) = file_config.user_id {
                user_id = ConfigValue::new(user, ConfigSource::File);
            }
            if let Some(level) = file_config.log_level {
                log_level = ConfigValue::new(level, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("CHEF_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("CHEF_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(user) = std::env::var("CHEF_USER_ID") {
            user_id = ConfigValue::new(user, ConfigSource::Environment);
        }
        if let Ok(level) = std::env::var("CHEF_LOG_LEVEL") {
            log_level = ConfigValue::new(level, ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            api_url,
            user_id,
            log_level,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/pocket-chef/
    /// - macOS: ~/Library/Application Support/pocket-chef/
    /// - Windows: %APPDATA%/pocket-chef/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pocket-chef")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/pocket-chef/
    /// - macOS: ~/Library/Application Support/pocket-chef/
    /// - Windows: %APPDATA%/pocket-chef/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pocket-chef")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Resolve relative paths against the config file's directory
fn resolve_relative(config_path: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        config_path
            .parent()
            .map(|p| p.join(&path))
            .unwrap_or(path)
    } else {
        path
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
