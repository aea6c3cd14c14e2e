//! Infrastructure layer for omni-ai
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading
//! and the HTTP provider adapter.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileAggregationConfig, FileConfig, FileOutputConfig,
    FileOutputFormat, FileProviderConfig, FileServerConfig, ResolvedConfig, process_env,
};
pub use providers::HttpProviderAdapter;
