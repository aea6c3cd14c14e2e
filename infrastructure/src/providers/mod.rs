//! HTTP provider adapter
//!
//! One [`HttpProviderAdapter`] serves every configured provider; the wire
//! format is picked per call from [`ProviderConfig::request_shape`].

mod anthropic;
mod chat_completions;
mod gemini;

use async_trait::async_trait;
use omni_application::ProviderAdapter;
use omni_domain::core::string::truncate;
use omni_domain::{ErrorDetail, ProviderConfig, Question, RequestShape};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const USER_AGENT: &str = concat!("omni-ai/", env!("CARGO_PKG_VERSION"));

/// Longest provider error body kept in an `HttpStatus` message.
const ERROR_BODY_EXCERPT: usize = 200;

/// Reqwest-backed [`ProviderAdapter`].
///
/// The client is shared across calls and tasks; the per-call deadline comes
/// from each provider's config.
#[derive(Debug, Clone)]
pub struct HttpProviderAdapter {
    client: Client,
}

impl HttpProviderAdapter {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProviderAdapter for HttpProviderAdapter {
    async fn call(
        &self,
        question: &Question,
        config: &ProviderConfig,
    ) -> Result<String, ErrorDetail> {
        let request = match config.request_shape {
            RequestShape::ChatCompletions => {
                chat_completions::request(&self.client, question, config)
            }
            RequestShape::GeminiGenerate => gemini::request(&self.client, question, config),
            RequestShape::AnthropicMessages => anthropic::request(&self.client, question, config),
        };
        let request = config
            .extra_headers
            .iter()
            .fold(request, |request, (name, value)| {
                request.header(name.as_str(), value.as_str())
            })
            .timeout(config.timeout);

        debug!(
            provider = %config.label,
            shape = %config.request_shape,
            url = %config.endpoint_url,
            "Sending provider request"
        );

        let response = request
            .send()
            .await
            .map_err(|e| request_error(config, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| request_error(config, e))?;

        if !status.is_success() {
            let excerpt = truncate(body.trim(), ERROR_BODY_EXCERPT);
            let message = if excerpt.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                excerpt
            };
            debug!(provider = %config.label, status = status.as_u16(), "Provider returned error status");
            return Err(ErrorDetail::http_status(status.as_u16(), message));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ErrorDetail::malformed(format!("response is not valid JSON: {}", e)))?;

        match config.request_shape {
            RequestShape::ChatCompletions => chat_completions::extract_text(&value),
            RequestShape::GeminiGenerate => gemini::extract_text(&value),
            RequestShape::AnthropicMessages => anthropic::extract_text(&value),
        }
    }
}

/// Map a reqwest failure. The URL is dropped since it may carry a key.
fn request_error(config: &ProviderConfig, err: reqwest::Error) -> ErrorDetail {
    if err.is_timeout() {
        ErrorDetail::timeout(format!(
            "no response within {}ms",
            config.timeout.as_millis()
        ))
    } else {
        ErrorDetail::transport(err.without_url().to_string())
    }
}

/// Message of a top-level `error` member, if the body carries one.
fn error_object(value: &Value) -> Option<String> {
    let error = value.get("error").filter(|e| !e.is_null())?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| error.as_str().map(str::to_string))
        .unwrap_or_else(|| error.to_string());
    Some(message)
}

fn non_empty_text(text: &str) -> Result<String, ErrorDetail> {
    let text = text.trim();
    if text.is_empty() {
        Err(ErrorDetail::empty_choice("response text is empty"))
    } else {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        extract::State,
        http::{HeaderMap, StatusCode, Uri},
    };
    use omni_domain::{Credential, ErrorKind};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Clone)]
    struct Captured {
        uri: String,
        headers: HeaderMap,
        body: Value,
    }

    #[derive(Clone)]
    struct MockState {
        status: StatusCode,
        body: String,
        delay: Duration,
        captured: Arc<Mutex<Vec<Captured>>>,
    }

    async fn mock_handler(
        State(state): State<MockState>,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, String) {
        tokio::time::sleep(state.delay).await;
        state.captured.lock().unwrap().push(Captured {
            uri: uri.to_string(),
            headers,
            body: serde_json::from_str(&body).unwrap_or(Value::Null),
        });
        (state.status, state.body.clone())
    }

    /// Serve a canned response on a random local port.
    async fn spawn_mock(
        status: StatusCode,
        body: Value,
        delay: Duration,
    ) -> (String, Arc<Mutex<Vec<Captured>>>) {
        spawn_mock_raw(status, body.to_string(), delay).await
    }

    async fn spawn_mock_raw(
        status: StatusCode,
        body: String,
        delay: Duration,
    ) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body,
            delay,
            captured: captured.clone(),
        };
        let app = Router::new().fallback(mock_handler).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/v1/endpoint", addr), captured)
    }

    fn question() -> Question {
        Question::try_new("What is 2+2?").unwrap()
    }

    fn adapter() -> HttpProviderAdapter {
        HttpProviderAdapter::new().unwrap()
    }

    #[tokio::test]
    async fn test_chat_completions_request_and_response() {
        let (url, captured) = spawn_mock(
            StatusCode::OK,
            json!({"choices": [{"message": {"content": " 4 "}}]}),
            Duration::ZERO,
        )
        .await;
        let config = ProviderConfig::new("gpt-4", "GPT", url, RequestShape::ChatCompletions)
            .with_credential(Credential::new("sk-test"))
            .with_header("X-Title", "Omni AI");

        let text = adapter().call(&question(), &config).await.unwrap();
        assert_eq!(text, "4");

        let captured = captured.lock().unwrap();
        let request = &captured[0];
        assert_eq!(request.headers["authorization"], "Bearer sk-test");
        assert_eq!(request.headers["x-title"], "Omni AI");
        assert_eq!(request.body["model"], "gpt-4");
        assert_eq!(request.body["messages"][0]["role"], "system");
        assert_eq!(request.body["messages"][0]["content"], "Be concise and helpful.");
        assert_eq!(request.body["messages"][1]["content"], "What is 2+2?");
    }

    #[tokio::test]
    async fn test_gemini_key_goes_in_query() {
        let (url, captured) = spawn_mock(
            StatusCode::OK,
            json!({"candidates": [{"content": {"parts": [{"text": "four"}]}}]}),
            Duration::ZERO,
        )
        .await;
        let config = ProviderConfig::new("gemini-pro", "Gemini", url, RequestShape::GeminiGenerate)
            .with_credential(Credential::new("g-key"));

        let text = adapter().call(&question(), &config).await.unwrap();
        assert_eq!(text, "four");

        let captured = captured.lock().unwrap();
        assert_eq!(captured[0].uri, "/v1/endpoint?key=g-key");
        assert!(captured[0].headers.get("authorization").is_none());
        assert_eq!(captured[0].body["contents"][0]["parts"][0]["text"], "What is 2+2?");
    }

    #[tokio::test]
    async fn test_anthropic_headers_and_max_tokens() {
        let (url, captured) = spawn_mock(
            StatusCode::OK,
            json!({"content": [{"type": "text", "text": "Four."}]}),
            Duration::ZERO,
        )
        .await;
        let config = ProviderConfig::new(
            "claude-3-haiku-20240307",
            "Claude",
            url,
            RequestShape::AnthropicMessages,
        )
        .with_credential(Credential::new("a-key"));

        let text = adapter().call(&question(), &config).await.unwrap();
        assert_eq!(text, "Four.");

        let captured = captured.lock().unwrap();
        let request = &captured[0];
        assert_eq!(request.headers["x-api-key"], "a-key");
        assert_eq!(request.headers["anthropic-version"], "2023-06-01");
        assert_eq!(request.body["max_tokens"], 500);
        assert_eq!(request.body["model"], "claude-3-haiku-20240307");
        assert_eq!(request.body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_missing_credential_sends_no_auth_and_surfaces_401() {
        let (url, captured) = spawn_mock(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "Incorrect API key provided"}}),
            Duration::ZERO,
        )
        .await;
        let config = ProviderConfig::new("gpt-4", "GPT", url, RequestShape::ChatCompletions);

        let err = adapter().call(&question(), &config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::HttpStatus(401));
        assert!(err.message.contains("Incorrect API key"));
        assert!(captured.lock().unwrap()[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_error_body_excerpt_is_bounded() {
        let (url, _) =
            spawn_mock_raw(StatusCode::BAD_GATEWAY, "x".repeat(1000), Duration::ZERO).await;
        let config = ProviderConfig::new("m", "M", url, RequestShape::ChatCompletions);

        let err = adapter().call(&question(), &config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::HttpStatus(502));
        assert!(err.message.chars().count() <= ERROR_BODY_EXCERPT);
    }

    #[tokio::test]
    async fn test_error_object_in_success_body_is_malformed() {
        let (url, _) = spawn_mock(
            StatusCode::OK,
            json!({"error": {"message": "No endpoints found for this model"}}),
            Duration::ZERO,
        )
        .await;
        let config = ProviderConfig::new("m", "M", url, RequestShape::ChatCompletions);

        let err = adapter().call(&question(), &config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
        assert_eq!(err.message, "No endpoints found for this model");
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let (url, _) =
            spawn_mock_raw(StatusCode::OK, "<html>hi</html>".to_string(), Duration::ZERO).await;
        let config = ProviderConfig::new("m", "M", url, RequestShape::AnthropicMessages);

        let err = adapter().call(&question(), &config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_choice() {
        let (url, _) = spawn_mock(StatusCode::OK, json!({"choices": []}), Duration::ZERO).await;
        let config = ProviderConfig::new("m", "M", url, RequestShape::ChatCompletions);

        let err = adapter().call(&question(), &config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyChoice);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let (url, _) = spawn_mock(
            StatusCode::OK,
            json!({"choices": [{"message": {"content": "late"}}]}),
            Duration::from_millis(500),
        )
        .await;
        let config = ProviderConfig::new("m", "Slow", url, RequestShape::ChatCompletions)
            .with_timeout(Duration::from_millis(50));

        let err = adapter().call(&question(), &config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert_eq!(err.message, "no response within 50ms");
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let config = ProviderConfig::new(
            "m",
            "Down",
            format!("http://{}/v1/endpoint", addr),
            RequestShape::ChatCompletions,
        );

        let err = adapter().call(&question(), &config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport);
    }
}
