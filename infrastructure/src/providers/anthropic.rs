//! Anthropic `messages`

use super::{error_object, non_empty_text};
use omni_domain::{ErrorDetail, ProviderConfig, Question};
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};

pub(super) const ANTHROPIC_VERSION: &str = "2023-06-01";

pub(super) fn request(client: &Client, question: &Question, config: &ProviderConfig) -> RequestBuilder {
    let body = json!({
        "model": config.id,
        "max_tokens": config.max_tokens,
        "messages": [{"role": "user", "content": question.content()}],
    });

    let request = client
        .post(&config.endpoint_url)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body);
    match &config.credential {
        Some(credential) => request.header("x-api-key", credential.expose()),
        None => request,
    }
}

/// `content[0].text`
pub(super) fn extract_text(value: &Value) -> Result<String, ErrorDetail> {
    if let Some(message) = error_object(value) {
        return Err(ErrorDetail::malformed(message));
    }

    let content = value
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| ErrorDetail::malformed("response has no 'content' array"))?;
    let first = content
        .first()
        .ok_or_else(|| ErrorDetail::empty_choice("response has no content blocks"))?;
    let text = first
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| ErrorDetail::malformed("content[0].text is missing"))?;

    non_empty_text(text)
}
