//! Config path lookup and argument handling for the listener binary

use std::path::PathBuf;

/// Where the listener configuration comes from
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Widget listener configuration (config/widget.yaml)
    Widget,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Path used when the environment does not name one
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Widget => "config/widget.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Environment variable that overrides the path
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Widget | ConfigType::Custom(_) => "WIDGET_CONFIG_PATH",
        }
    }
}

/// Resolve the config path, preferring the environment
///
/// # Examples
/// ```
/// use monobank_base_ws::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Widget);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Command line arguments without the program name
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}
