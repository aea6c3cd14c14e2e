//! Provider configuration types (provider-neutral, serde-free).
//!
//! A [`ProviderConfig`] identifies one backend the aggregation engine fans
//! out to. The set is built once at startup and shared read-only for the
//! rest of the process lifetime.

use crate::core::error::DomainError;
use std::str::FromStr;
use std::time::Duration;

/// Per-call deadline used when a provider does not set its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// `max_tokens` sent with Anthropic-style requests.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Wire format a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestShape {
    /// OpenAI-compatible `chat/completions` (OpenAI, OpenRouter, Mistral)
    ChatCompletions,
    /// Google Gemini `generateContent`
    GeminiGenerate,
    /// Anthropic `messages`
    AnthropicMessages,
}

impl RequestShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestShape::ChatCompletions => "chat_completions",
            RequestShape::GeminiGenerate => "gemini_generate",
            RequestShape::AnthropicMessages => "anthropic_messages",
        }
    }
}

impl std::fmt::Display for RequestShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestShape {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "chat_completions" | "openai" | "openrouter" => Ok(RequestShape::ChatCompletions),
            "gemini_generate" | "gemini" => Ok(RequestShape::GeminiGenerate),
            "anthropic_messages" | "anthropic" => Ok(RequestShape::AnthropicMessages),
            other => Err(DomainError::UnknownRequestShape(other.to_string())),
        }
    }
}

/// Opaque API secret.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// One configured backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Model identifier sent upstream (e.g. "gpt-3.5-turbo", "google/gemini-pro")
    pub id: String,
    /// Display name and key in the aggregated `responses` map
    pub label: String,
    /// Full endpoint URL
    pub endpoint_url: String,
    /// `None` when the credential is not configured; the call still goes out
    pub credential: Option<Credential>,
    pub request_shape: RequestShape,
    /// Hard deadline for one call
    pub timeout: Duration,
    /// Extra headers sent with every request (e.g. OpenRouter's `HTTP-Referer`)
    pub extra_headers: Vec<(String, String)>,
    /// Only used by [`RequestShape::AnthropicMessages`]
    pub max_tokens: u32,
}

impl ProviderConfig {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        endpoint_url: impl Into<String>,
        request_shape: RequestShape,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            endpoint_url: endpoint_url.into(),
            credential: None,
            request_shape,
            timeout: DEFAULT_TIMEOUT,
            extra_headers: Vec::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
