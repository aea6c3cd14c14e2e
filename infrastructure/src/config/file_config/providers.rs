//! Provider configuration from TOML (`[[providers]]` array)

use omni_domain::{ConfigIssue, ConfigIssueCode, Credential, ProviderConfig, RequestShape};
use omni_domain::providers::DEFAULT_MAX_TOKENS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// One `[[providers]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    /// Model identifier sent upstream
    pub id: String,
    /// Key in the `responses` map
    pub label: String,
    /// Wire format: "chat_completions", "gemini_generate", "anthropic_messages"
    /// (aliases "openai", "openrouter", "gemini", "anthropic")
    pub shape: String,
    /// Endpoint URL (default: the vendor's public endpoint for `shape`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Environment variable holding the API key (default depends on `shape`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended; use `api_key_env` instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Extra request headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

fn default_timeout_ms() -> u64 {
    omni_domain::DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// Public endpoint for a shape. Gemini puts the model id in the path.
pub fn default_endpoint(shape: RequestShape, id: &str) -> String {
    match shape {
        RequestShape::ChatCompletions => "https://api.openai.com/v1/chat/completions".to_string(),
        RequestShape::GeminiGenerate => format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            id
        ),
        RequestShape::AnthropicMessages => "https://api.anthropic.com/v1/messages".to_string(),
    }
}

/// Credential environment variable used when `api_key_env` is not set.
pub fn default_api_key_env(shape: RequestShape) -> &'static str {
    match shape {
        RequestShape::ChatCompletions => "OPENAI_API_KEY",
        RequestShape::GeminiGenerate => "GOOGLE_API_KEY",
        RequestShape::AnthropicMessages => "ANTHROPIC_API_KEY",
    }
}

impl FileProviderConfig {
    pub fn new(id: &str, label: &str, shape: RequestShape) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            shape: shape.as_str().to_string(),
            endpoint: None,
            api_key_env: None,
            api_key: None,
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            headers: BTreeMap::new(),
        }
    }

    /// The three direct vendor backends used when no providers are configured.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("gpt-3.5-turbo", "GPT", RequestShape::ChatCompletions),
            Self::new("gemini-pro", "Gemini", RequestShape::GeminiGenerate),
            Self::new(
                "claude-3-haiku-20240307",
                "Claude",
                RequestShape::AnthropicMessages,
            ),
        ]
    }

    /// Resolve this entry into a [`ProviderConfig`].
    ///
    /// `index` is only used in issue messages. `lookup` resolves environment
    /// variables. An empty variable counts as unset.
    pub fn to_provider_config(
        &self,
        index: usize,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> (Option<ProviderConfig>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        for (field, value) in [("id", &self.id), ("label", &self.label)] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyField {
                        field: format!("providers[{}].{}", index, field),
                    },
                    format!("providers[{}].{}: must not be empty", index, field),
                ));
            }
        }

        if self.timeout_ms == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: format!("providers[{}].timeout_ms", index),
                    value: "0".to_string(),
                },
                format!("providers[{}].timeout_ms: must be greater than 0", index),
            ));
        }

        let shape = match self.shape.parse::<RequestShape>() {
            Ok(shape) => Some(shape),
            Err(_) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("providers[{}].shape", index),
                        value: self.shape.clone(),
                        valid_values: vec![
                            "chat_completions".to_string(),
                            "gemini_generate".to_string(),
                            "anthropic_messages".to_string(),
                        ],
                    },
                    format!("providers[{}].shape: unknown value '{}'", index, self.shape),
                ));
                None
            }
        };

        let Some(shape) = shape else {
            return (None, issues);
        };
        if issues.iter().any(ConfigIssue::is_error) {
            return (None, issues);
        }

        let endpoint = self
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| default_endpoint(shape, &self.id));

        let mut config = ProviderConfig::new(&self.id, &self.label, endpoint, shape)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_max_tokens(self.max_tokens);
        for (name, value) in &self.headers {
            config = config.with_header(name, value);
        }

        let env_var = self
            .api_key_env
            .clone()
            .unwrap_or_else(|| default_api_key_env(shape).to_string());
        let secret = self
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| lookup(&env_var).filter(|k| !k.is_empty()));

        match secret {
            Some(secret) => config = config.with_credential(Credential::new(secret)),
            None => issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingCredential {
                    label: self.label.clone(),
                    env_var: env_var.clone(),
                },
                format!(
                    "provider '{}': {} is not set, requests will be sent without a credential",
                    self.label, env_var
                ),
            )),
        }

        (Some(config), issues)
    }
}
