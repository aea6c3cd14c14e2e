//! Configuration file loading for omni-ai
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `OMNI_*` environment variables (`OMNI_SERVER__BIND=0.0.0.0:8000`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./omni.toml` or `./.omni.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/omni-ai/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, DEFAULT_BIND, FileAggregationConfig, FileConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig, FileServerConfig, ResolvedConfig, default_api_key_env,
    default_endpoint, process_env,
};
pub use loader::ConfigLoader;
