//! Monobank widget listener - Main Library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, config, logging)
//! - **monosockets**: Widget channel session library (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use monobank_base_ws::bin_common::{load_config_from_env, ConfigType, ListenerConfig};
//! use monobank_base_ws::monosockets::Session;
//! ```

// Re-export workspace libraries for convenience
pub use monosockets;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod config;
    pub mod logging;

    pub use cli::{load_config_from_env, parse_args, ConfigType};
    pub use config::{ConfigError, ListenerConfig};
    pub use logging::init_tracing;
}
