use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Configuration structure for the pipeline.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// API domain for fetching data. Should include https:// prefix.
    pub api_domain: String,
    /// Bearer token for the API. Usually supplied via the CFBD_API_KEY
    /// environment variable instead of the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Directory where CSV output is written. Defaults to "data".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Path to the log file. If not specified, logs go to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: constants::DEFAULT_API_DOMAIN.to_string(),
            api_key: None,
            data_dir: None,
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, falls back to defaults so the pipeline can
    /// run without a config file at all. Environment variables override
    /// config file values.
    ///
    /// # Environment Variables
    /// - `CFBD_API_KEY` - API bearer token
    /// - `CFBD_API_DOMAIN` - Override API domain
    /// - `CFBD_DATA_DIR` - Override data directory
    /// - `CFBD_LOG_FILE` - Override log file path
    /// - `CFBD_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    pub async fn load() -> Result<Self, AppError> {
        let config_path = Config::get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // Override with environment variables if present
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            config.api_domain = api_domain;
        }

        if let Ok(api_key) = std::env::var(env_vars::API_KEY) {
            config.api_key = Some(api_key);
        }

        if let Ok(data_dir) = std::env::var(env_vars::DATA_DIR) {
            config.data_dir = Some(data_dir);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api_domain.trim().is_empty() {
            return Err(AppError::config_error("API domain cannot be empty"));
        }
        if !self.api_domain.starts_with("http://") && !self.api_domain.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "API domain must start with http:// or https://: {}",
                self.api_domain
            )));
        }
        if self.http_timeout_seconds == 0 {
            return Err(AppError::config_error(
                "HTTP timeout must be greater than zero",
            ));
        }
        Ok(())
    }

    /// The data directory for CSV output, falling back to the default.
    pub fn resolved_data_dir(&self) -> String {
        self.data_dir
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_DATA_DIR.to_string())
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = Config::get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Saves current configuration to a specific path. Creates parent
    /// directories as needed and normalizes the api_domain prefix.
    pub async fn save_to_path(&self, config_path: &str) -> Result<(), AppError> {
        if let Some(config_dir) = Path::new(config_path).parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).await?;
            }
        }

        // Ensure api_domain has https:// prefix
        let api_domain = if !self.api_domain.starts_with("https://")
            && !self.api_domain.starts_with("http://")
        {
            format!("https://{}", self.api_domain)
        } else {
            self.api_domain.clone()
        };

        let mut normalized = self.clone();
        normalized.api_domain = api_domain;

        let content = toml::to_string_pretty(&normalized)?;
        let mut file = fs::File::create(config_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Loads configuration from a specific path without env overrides.
    pub async fn load_from_path(config_path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(config_path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("cfbd-pipeline")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        dirs::data_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("cfbd-pipeline")
            .join("logs")
            .to_string_lossy()
            .to_string()
    }

    /// Prints the current configuration to stdout. The API key is never
    /// printed, only whether one is set.
    pub async fn display() -> Result<(), AppError> {
        let config_path = Config::get_config_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("API Domain:");
            println!("{}", config.api_domain);
            println!("API Key:");
            println!(
                "{}",
                if config.api_key.is_some() {
                    "set (hidden)"
                } else {
                    "not set"
                }
            );
            println!("Data Directory:");
            println!("{}", config.resolved_data_dir());
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("Defaults are used; set CFBD_API_KEY for authenticated requests.");
        }

        Ok(())
    }
}
