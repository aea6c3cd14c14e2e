//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and resolved into domain types by
//! [`FileConfig::resolve`].

mod aggregation;
mod output;
mod providers;
mod server;

pub use aggregation::FileAggregationConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileProviderConfig, default_api_key_env, default_endpoint};
pub use server::{DEFAULT_BIND, FileServerConfig};

use omni_domain::{
    ConfigIssue, ConfigIssueCode, ProviderConfig, RetryPolicy, SummaryPolicy,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP front door settings
    pub server: FileServerConfig,
    /// Summary and retry settings
    pub aggregation: FileAggregationConfig,
    /// Backends fanned out to, in configuration order
    pub providers: Vec<FileProviderConfig>,
    /// Console output settings
    pub output: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            server: FileServerConfig::default(),
            aggregation: FileAggregationConfig::default(),
            providers: FileProviderConfig::defaults(),
            output: FileOutputConfig::default(),
        }
    }
}

/// Configuration resolved into the types the engine and server consume.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub bind: String,
    pub providers: Vec<ProviderConfig>,
    pub summary_policy: SummaryPolicy,
    pub retry_policy: RetryPolicy,
    /// Non-fatal issues found while resolving
    pub warnings: Vec<ConfigIssue>,
}

/// Fatal configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. At least one provider is configured
    /// 2. Each provider entry (empty fields, unknown shape, missing credential)
    /// 3. Duplicate labels
    /// 4. Summary policy and its provider reference
    pub fn validate(&self, lookup: &dyn Fn(&str) -> Option<String>) -> Vec<ConfigIssue> {
        let (_, _, issues) = self.resolve_parts(lookup);
        issues
    }

    /// Resolve every `[[providers]]` entry, skipping entries with errors.
    pub fn provider_configs(
        &self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> (Vec<ProviderConfig>, Vec<ConfigIssue>) {
        let mut configs = Vec::with_capacity(self.providers.len());
        let mut issues = Vec::new();

        if self.providers.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoProviders,
                "no providers configured; add at least one [[providers]] entry",
            ));
        }

        for (index, entry) in self.providers.iter().enumerate() {
            let (config, entry_issues) = entry.to_provider_config(index, lookup);
            issues.extend(entry_issues);
            configs.extend(config);
        }

        let mut seen = HashSet::new();
        for config in &configs {
            if !seen.insert(config.label.as_str()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateLabel {
                        label: config.label.clone(),
                    },
                    format!(
                        "provider label '{}' is used more than once; the later answer overwrites the earlier",
                        config.label
                    ),
                ));
            }
        }

        (configs, issues)
    }

    /// Resolve into engine-ready settings, failing on any error-level issue.
    pub fn resolve(
        &self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let (providers, summary_policy, issues) = self.resolve_parts(lookup);
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(ConfigIssue::is_error);

        match summary_policy {
            Some(summary_policy) if errors.is_empty() => Ok(ResolvedConfig {
                bind: self.server.bind.clone(),
                providers,
                summary_policy,
                retry_policy: self.aggregation.retry_policy(),
                warnings,
            }),
            _ => Err(ConfigError::Invalid(errors)),
        }
    }

    fn resolve_parts(
        &self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> (Vec<ProviderConfig>, Option<SummaryPolicy>, Vec<ConfigIssue>) {
        let (providers, mut issues) = self.provider_configs(lookup);
        let (summary_policy, summary_issues) = self.aggregation.parse_summary_policy(&providers);
        issues.extend(summary_issues);
        (providers, summary_policy, issues)
    }
}

/// Environment lookup backed by the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
