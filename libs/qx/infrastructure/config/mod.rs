//! Dashboard configuration
//!
//! YAML file with defaults for every field, overridden by environment
//! variables (a `.env` file is honoured).

use crate::domain::DEFAULT_LEVELS_PER_SIDE;
use crate::infrastructure::client::{BACKEND_API_BASE_URL, QX_API_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub qx_api_url: String,
    pub backend_api_url: String,
    pub asset: String,
    /// Issuer identity of `asset`; required by the order-book cockpit
    pub issuer: String,
    /// Order-book refresh interval
    pub poll_interval_ms: u64,
    pub levels_per_side: usize,
    pub request_timeout_secs: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Connected wallet, highlighted in activity output
    pub wallet: Option<String>,
    /// Environment variables applied on load, reported by [`log`](Self::log)
    #[serde(skip)]
    pub env_overrides: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            qx_api_url: QX_API_BASE_URL.to_string(),
            backend_api_url: BACKEND_API_BASE_URL.to_string(),
            asset: "QDOGE".to_string(),
            issuer: String::new(),
            poll_interval_ms: 1500,
            levels_per_side: DEFAULT_LEVELS_PER_SIDE,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            wallet: None,
            env_overrides: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from YAML file, then apply env overrides
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let config = Self::from_yaml(&yaml_content)?;
        config.finish()
    }

    /// Like [`load`](Self::load), but a missing file means defaults
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            warn!("Config file {} not found, using defaults", path.display());
            Self::default().finish()
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn finish(mut self) -> Result<Self> {
        dotenv::dotenv().ok();
        self.apply_env_overrides(|key| std::env::var(key).ok());
        self.validate()?;
        Ok(self)
    }

    /// Override fields from environment-style lookups
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let mut applied = |key: &str| {
            let value = lookup(key);
            if value.is_some() {
                self.env_overrides.push(key.to_string());
            }
            value
        };

        let qx_api_url = applied("QX_API_URL");
        let backend_api_url = applied("BACKEND_API_URL");
        let issuer = applied("QX_ISSUER");
        let wallet = applied("QX_WALLET");

        if let Some(url) = qx_api_url {
            self.qx_api_url = url;
        }
        if let Some(url) = backend_api_url {
            self.backend_api_url = url;
        }
        if let Some(issuer) = issuer {
            self.issuer = issuer;
        }
        if let Some(wallet) = wallet {
            self.wallet = Some(wallet).filter(|w| !w.trim().is_empty());
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.qx_api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "qx_api_url must not be empty".to_string(),
            ));
        }

        if self.backend_api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend_api_url must not be empty".to_string(),
            ));
        }

        if self.asset.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "asset must not be empty".to_string(),
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.levels_per_side == 0 {
            return Err(ConfigError::ValidationError(
                "levels_per_side must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Issuer of the configured asset, or an error when unset
    pub fn require_issuer(&self) -> Result<&str> {
        let issuer = self.issuer.trim();
        if issuer.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "issuer for {} is not configured (set `issuer` or QX_ISSUER)",
                self.asset
            )));
        }
        Ok(issuer)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration:");
        info!("  QX API: {}", self.qx_api_url);
        info!("  Backend: {}", self.backend_api_url);
        info!("  Asset: {} (issuer: {})", self.asset, self.issuer);
        info!("  Poll interval: {}ms", self.poll_interval_ms);
        info!("  Levels per side: {}", self.levels_per_side);
        if let Some(wallet) = &self.wallet {
            info!("  Wallet: {}", wallet);
        }
        if !self.env_overrides.is_empty() {
            info!("  Env overrides: {}", self.env_overrides.join(", "));
        }
    }
}
