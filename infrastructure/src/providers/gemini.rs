//! Google Gemini `generateContent`

use super::{error_object, non_empty_text};
use omni_domain::{ErrorDetail, ProviderConfig, Question};
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};

pub(super) fn request(client: &Client, question: &Question, config: &ProviderConfig) -> RequestBuilder {
    let body = json!({
        "contents": [{"parts": [{"text": question.content()}]}],
    });

    let request = client.post(&config.endpoint_url).json(&body);
    match &config.credential {
        Some(credential) => request.query(&[("key", credential.expose())]),
        None => request,
    }
}

/// `candidates[0].content.parts[0].text`
///
/// A blocked prompt comes back as 200 with `promptFeedback` and no
/// candidates.
pub(super) fn extract_text(value: &Value) -> Result<String, ErrorDetail> {
    if let Some(message) = error_object(value) {
        return Err(ErrorDetail::malformed(message));
    }

    let candidates = match value.get("candidates") {
        Some(candidates) => candidates
            .as_array()
            .ok_or_else(|| ErrorDetail::malformed("'candidates' is not an array"))?,
        None if value.get("promptFeedback").is_some() => {
            let reason = value
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            return Err(ErrorDetail::empty_choice(format!(
                "prompt blocked: {}",
                reason
            )));
        }
        None => return Err(ErrorDetail::malformed("response has no 'candidates' array")),
    };

    let first = candidates
        .first()
        .ok_or_else(|| ErrorDetail::empty_choice("response has no candidates"))?;
    let text = first
        .pointer("/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| ErrorDetail::malformed("candidates[0].content.parts[0].text is missing"))?;

    non_empty_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use omni_domain::ErrorKind;

    #[test]
    fn test_extract_text() {
        let value = json!({"candidates": [{"content": {"parts": [{"text": "Paris\n"}], "role": "model"}}]});
        assert_eq!(extract_text(&value).unwrap(), "Paris");
    }

    #[test]
    fn test_blocked_prompt_is_empty_choice() {
        let value = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = extract_text(&value).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyChoice);
        assert!(err.message.contains("SAFETY"));
    }

    #[test]
    fn test_empty_candidates() {
        let err = extract_text(&json!({"candidates": []})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyChoice);
    }

    #[test]
    fn test_missing_parts_is_malformed() {
        let value = json!({"candidates": [{"content": {"role": "model"}}]});
        assert_eq!(extract_text(&value).unwrap_err().kind, ErrorKind::MalformedResponse);
    }
}
