//! OpenAI-compatible `chat/completions` (OpenAI, OpenRouter, Mistral)

use super::{error_object, non_empty_text};
use omni_domain::{ErrorDetail, PromptTemplate, ProviderConfig, Question};
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};

pub(super) fn request(client: &Client, question: &Question, config: &ProviderConfig) -> RequestBuilder {
    let body = json!({
        "model": config.id,
        "messages": [
            {"role": "system", "content": PromptTemplate::concise_system()},
            {"role": "user", "content": question.content()},
        ],
    });

    let request = client.post(&config.endpoint_url).json(&body);
    match &config.credential {
        Some(credential) => request.bearer_auth(credential.expose()),
        None => request,
    }
}

/// `choices[0].message.content`
pub(super) fn extract_text(value: &Value) -> Result<String, ErrorDetail> {
    if let Some(message) = error_object(value) {
        return Err(ErrorDetail::malformed(message));
    }

    let choices = value
        .get("choices")
        .and_then(Value::as_array)
        .ok_or_else(|| ErrorDetail::malformed("response has no 'choices' array"))?;
    let first = choices
        .first()
        .ok_or_else(|| ErrorDetail::empty_choice("response has no choices"))?;
    let content = first
        .pointer("/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| ErrorDetail::malformed("choices[0].message.content is missing"))?;

    non_empty_text(content)
}
