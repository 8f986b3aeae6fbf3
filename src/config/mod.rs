use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
///
/// Built once at process start and handed to the fetchers explicitly; nothing
/// below `main` reads the environment.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the Limitless API, e.g. `https://play.limitlesstcg.com/api`.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Access key sent in the `X-Access-Key` header. Only ever read from the environment.
    #[serde(skip)]
    pub api_key: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Upper bound on simultaneous standings requests. `None` fans out without a cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
}

fn default_api_domain() -> String {
    constants::DEFAULT_API_DOMAIN.to_string()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            api_key: String::new(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            max_concurrency: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location and the environment.
    ///
    /// # Environment Variables
    /// - `LIMITLESS_API_KEY` - API credential (required)
    /// - `LIMITLESS_API_DOMAIN` - Override API domain
    /// - `LIMITLESS_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `LIMITLESS_MAX_CONCURRENCY` - Cap simultaneous standings requests
    /// - `LIMITLESS_LOG_FILE` - Override log file path
    ///
    /// # Notes
    /// - A missing config file is not an error; defaults are used
    /// - Environment variables take precedence over config file
    /// - A missing credential is a fatal `AppError::Config`
    /// - Other settings are checked later by [`Config::validate`], once
    ///   command-line overrides have been applied
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_file(&get_config_path()).await
    }

    /// Same as [`Config::load`] but reads the optional config file from `path`.
    pub async fn load_with_file(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Loads configuration from a TOML file without consulting the environment.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Applies environment overrides and reads the credential.
    fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        self.api_key = match std::env::var(env_vars::API_KEY) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(AppError::config_error(format!(
                    "{} environment variable not set",
                    env_vars::API_KEY
                )));
            }
        };

        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Ok(raw) = std::env::var(env_vars::HTTP_TIMEOUT) {
            self.http_timeout_seconds = raw.parse::<u64>().map_err(|e| {
                AppError::config_error(format!("Invalid {}: {e}", env_vars::HTTP_TIMEOUT))
            })?;
        }

        if let Ok(raw) = std::env::var(env_vars::MAX_CONCURRENCY) {
            let limit = raw.parse::<usize>().map_err(|e| {
                AppError::config_error(format!("Invalid {}: {e}", env_vars::MAX_CONCURRENCY))
            })?;
            self.max_concurrency = Some(limit);
        }

        Ok(())
    }

    /// Applies command-line overrides, which take precedence over file and environment.
    pub fn apply_cli_overrides(&mut self, max_concurrency: Option<usize>, timeout: Option<u64>) {
        if let Some(limit) = max_concurrency {
            self.max_concurrency = Some(limit);
        }
        if let Some(timeout) = timeout {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        get_log_dir_path()
    }

    /// Displays current configuration settings to stdout. The API key is masked.
    pub fn display(&self) {
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{}", get_config_path());
        println!("────────────────────────────────────");
        println!("API Domain:");
        println!("{}", self.api_domain);
        println!("────────────────────────────────────");
        println!("API Key:");
        println!("{}", mask_credential(&self.api_key));
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", self.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Max Concurrency:");
        match self.max_concurrency {
            Some(limit) => println!("{limit}"),
            None => println!("unbounded"),
        }
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &self.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{}/{}", get_log_dir_path(), constants::LOG_FILE_NAME);
            println!("(Default location)");
        }
    }
}

/// Mask sensitive credential values for display
pub fn mask_credential(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}
