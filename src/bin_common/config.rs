//! Widget listener configuration
//!
//! Loaded from YAML, with `WIDGET_URL` from the environment taking precedence
//! over the file's `widget_url`.

use monosockets::{WidgetIdentity, DEFAULT_PING_INTERVAL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Environment variable that overrides `widget_url`
pub const WIDGET_URL_ENV: &str = "WIDGET_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarMissing(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Widget page URL carrying `token`, `widgetId` and `shortName`
    #[serde(default)]
    pub widget_url: String,

    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,

    /// Override for the channel endpoint
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Extra handshake headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_ping_interval_secs() -> u64 {
    DEFAULT_PING_INTERVAL.as_secs()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ListenerConfig {
    /// Config with defaults for everything but the widget URL
    pub fn from_widget_url(widget_url: impl Into<String>) -> Self {
        Self {
            widget_url: widget_url.into(),
            ping_interval_secs: default_ping_interval_secs(),
            endpoint: None,
            headers: HashMap::new(),
            log_level: default_log_level(),
        }
    }

    /// Load configuration from YAML file, applying `WIDGET_URL` if set
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_override(config_path, std::env::var(WIDGET_URL_ENV).ok())
    }

    /// Load configuration with an explicit widget URL override
    ///
    /// A missing file is fine as long as the override supplies the URL.
    pub fn load_with_override(
        config_path: impl AsRef<Path>,
        widget_url: Option<String>,
    ) -> Result<Self> {
        let config_path = config_path.as_ref();

        let mut config = if config_path.exists() {
            let yaml_content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&yaml_content)?
        } else {
            match &widget_url {
                Some(url) => Self::from_widget_url(url.clone()),
                None => {
                    return Err(ConfigError::EnvVarMissing(format!(
                        "{} (no config file at {})",
                        WIDGET_URL_ENV,
                        config_path.display()
                    )))
                }
            }
        };

        if let Some(url) = widget_url {
            info!("Overriding widget URL from environment variable");
            config.widget_url = url;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.widget_url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "widget_url is required (set it in the file or via {})",
                WIDGET_URL_ENV
            )));
        }

        WidgetIdentity::parse(&self.widget_url)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.ping_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "ping_interval_secs must be greater than 0".to_string(),
            ));
        }

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("ws://") && !endpoint.starts_with("wss://") {
                return Err(ConfigError::ValidationError(format!(
                    "endpoint must be a ws:// or wss:// URL, got '{}'",
                    endpoint
                )));
            }
        }

        Ok(())
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    /// Log configuration summary; the widget URL holds a token and is not printed
    pub fn log(&self) {
        info!("Widget Listener Configuration:");
        info!("  Ping interval: {} seconds", self.ping_interval_secs);
        info!(
            "  Endpoint: {}",
            self.endpoint.as_deref().unwrap_or(monosockets::MONOBANK_WS_URL)
        );
        info!("  Extra headers: {}", self.headers.len());
        info!("  Log level: {}", self.log_level);
    }
}
