//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Address the HTTP front door binds to (host:port)
    pub bind: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}
