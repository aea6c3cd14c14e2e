//! Aggregation settings from TOML (`[aggregation]` section)

use omni_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_SUMMARY_MAX_CHARS, ProviderConfig, RetryPolicy,
    SummaryPolicy,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAggregationConfig {
    /// Summary policy: "concat" (default) or "model"
    pub summary: String,
    /// Characters kept per response by the "concat" policy
    pub summary_max_chars: usize,
    /// Provider label asked to write the summary under the "model" policy
    pub summary_provider: Option<String>,
    /// Extra attempts for retryable provider failures (0 = single attempt)
    pub max_retries: u32,
    /// Backoff before the first retry, doubled per further retry
    pub retry_backoff_ms: u64,
}

impl Default for FileAggregationConfig {
    fn default() -> Self {
        Self {
            summary: "concat".to_string(),
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
            summary_provider: None,
            max_retries: 0,
            retry_backoff_ms: 250,
        }
    }
}

impl FileAggregationConfig {
    /// Resolve the summary policy against the resolved provider list.
    pub fn parse_summary_policy(
        &self,
        providers: &[ProviderConfig],
    ) -> (Option<SummaryPolicy>, Vec<ConfigIssue>) {
        match self.summary.to_lowercase().as_str() {
            "concat" => (
                Some(SummaryPolicy::Concat {
                    max_chars: self.summary_max_chars,
                }),
                vec![],
            ),
            "model" | "model_generated" => {
                let label = self.summary_provider.clone().unwrap_or_default();
                match providers.iter().find(|p| p.label == label) {
                    Some(provider) => (
                        Some(SummaryPolicy::ModelGenerated {
                            provider: provider.clone(),
                        }),
                        vec![],
                    ),
                    None => (
                        None,
                        vec![ConfigIssue::error(
                            ConfigIssueCode::UnknownSummaryProvider {
                                label: label.clone(),
                            },
                            format!(
                                "aggregation.summary_provider: no provider labelled '{}'",
                                label
                            ),
                        )],
                    ),
                }
            }
            other => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "aggregation.summary".to_string(),
                        value: other.to_string(),
                        valid_values: vec!["concat".to_string(), "model".to_string()],
                    },
                    format!("aggregation.summary: unknown value '{}'", other),
                )],
            ),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.retry_backoff_ms),
        )
    }
}
