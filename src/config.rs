use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::fetch::redirect::DEFAULT_MAX_REDIRECTS;

/// Config file looked up in the working directory when `FAMCHECK_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "famcheck.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub famcheck: FamcheckConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
pub struct FamcheckConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for FamcheckConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Article API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// What to do when fetching one relative's article fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// The whole resolution fails
    #[default]
    FailFast,
    /// The relative is reported as "Can't check" and resolution continues
    Degrade,
}

/// Family resolution configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default)]
    pub on_fetch_error: FetchFailurePolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_redirects: default_max_redirects(),
            on_fetch_error: FetchFailurePolicy::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_endpoint() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    format!("famcheck/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) first.
    /// Looks for the config file in this order:
    /// 1. Path specified in FAMCHECK_CONFIG environment variable (must exist)
    /// 2. ./famcheck.toml in current directory (optional)
    ///
    /// Without either, built-in defaults are used. FAMCHECK_API_ENDPOINT
    /// overrides `api.endpoint`.
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config = match std::env::var("FAMCHECK_CONFIG") {
            Ok(path) => Self::from_file(PathBuf::from(path))?,
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Config::default()
                }
            }
        };

        config.with_env_overrides().validated()
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let _ = dotenv::dotenv();
        Self::from_file(path.into())?.with_env_overrides().validated()
    }

    fn from_file(path: PathBuf) -> Result<Self> {
        let config_str = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("FAMCHECK_API_ENDPOINT") {
            self.api.endpoint = endpoint;
        }
        self
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.api.endpoint)
            .with_context(|| format!("api.endpoint is not a valid URL: {}", self.api.endpoint))?;

        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            anyhow::bail!("api.endpoint must use http or https, got {}", endpoint.scheme());
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than 0");
        }

        if self.resolver.max_redirects == 0 {
            anyhow::bail!("resolver.max_redirects must be greater than 0");
        }

        Ok(())
    }
}
