//! HTTP front door
//!
//! `POST /ask` and `POST /summary` run one aggregation and return
//! `{question, responses, summary}`. `GET /` is a liveness probe.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use omni_application::{AggregationEngine, ProviderAdapter, RunAggregationError};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub const MISSING_QUESTION: &str = "Missing 'question' field.";

/// Shared state for every request
pub struct AppState<A: ProviderAdapter + 'static> {
    engine: Arc<AggregationEngine<A>>,
}

impl<A: ProviderAdapter + 'static> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

/// Request body. Older clients send `query` or `text` instead of `question`.
#[derive(Debug, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl AskRequest {
    /// First non-blank of `question`, `query`, `text`.
    pub fn question(&self) -> Option<&str> {
        [&self.question, &self.query, &self.text]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|q| !q.trim().is_empty())
    }
}

/// Build the Axum router
pub fn router<A: ProviderAdapter + 'static>(engine: AggregationEngine<A>) -> Router {
    let state = AppState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/", get(health_handler::<A>))
        .route("/ask", post(ask_handler::<A>))
        .route("/summary", post(ask_handler::<A>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve<A, F>(engine: AggregationEngine<A>, bind: &str, shutdown: F) -> std::io::Result<()>
where
    A: ProviderAdapter + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind).await?;
    info!(
        "Omni AI listening on {} with {} providers",
        listener.local_addr()?,
        engine.providers().len()
    );

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown)
        .await
}

// ── HTTP Handlers ──

async fn health_handler<A: ProviderAdapter + 'static>(
    State(state): State<AppState<A>>,
) -> impl IntoResponse {
    let providers: Vec<&str> = state
        .engine
        .providers()
        .iter()
        .map(|p| p.label.as_str())
        .collect();

    Json(json!({
        "message": "Backend is live",
        "providers": providers,
    }))
}

async fn ask_handler<A: ProviderAdapter + 'static>(
    State(state): State<AppState<A>>,
    body: Bytes,
) -> Response {
    // The body is parsed whatever the content-type header says.
    let request: AskRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected request body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Invalid JSON body: {}", e) })),
            )
                .into_response();
        }
    };

    let Some(question) = request.question() else {
        return missing_question();
    };

    match state.engine.run(question).await {
        Ok(result) => Json(result).into_response(),
        Err(RunAggregationError::InvalidInput(e)) => {
            warn!("Rejected question: {}", e);
            missing_question()
        }
    }
}

fn missing_question() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": MISSING_QUESTION })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use omni_domain::{ErrorDetail, ProviderConfig, Question, RequestShape};
    use serde_json::Value;

    /// Echoes the question back, tagged with the provider label.
    struct EchoAdapter;

    #[async_trait]
    impl ProviderAdapter for EchoAdapter {
        async fn call(
            &self,
            question: &Question,
            config: &ProviderConfig,
        ) -> Result<String, ErrorDetail> {
            if config.label == "Down" {
                return Err(ErrorDetail::transport("connection refused"));
            }
            Ok(format!("{} says {}", config.label, question))
        }
    }

    fn provider(label: &str) -> ProviderConfig {
        ProviderConfig::new(
            label.to_lowercase(),
            label,
            "http://unused",
            RequestShape::ChatCompletions,
        )
    }

    async fn spawn_app(labels: &[&str]) -> String {
        let providers: Vec<_> = labels.iter().map(|l| provider(l)).collect();
        let engine = AggregationEngine::new(Arc::new(EchoAdapter), providers);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(engine)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_ask_returns_every_provider() {
        let base = spawn_app(&["GPT", "Down", "Claude"]).await;
        let response = reqwest::Client::new()
            .post(format!("{}/ask", base))
            .json(&json!({"question": "hi"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["question"], "hi");
        assert_eq!(body["responses"]["GPT"], "GPT says hi");
        assert_eq!(body["responses"]["Claude"], "Claude says hi");
        assert!(
            body["responses"]["Down"]
                .as_str()
                .unwrap()
                .contains("Transport")
        );
        assert!(body["summary"].as_str().unwrap().starts_with("GPT: GPT says hi..."));

        let labels: Vec<_> = body["responses"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(labels.len(), 3);
    }

    #[tokio::test]
    async fn test_summary_route_accepts_query_alias() {
        let base = spawn_app(&["GPT"]).await;
        let body: Value = reqwest::Client::new()
            .post(format!("{}/summary", base))
            .json(&json!({"query": "why"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["question"], "why");
        assert_eq!(body["summary"], "GPT: GPT says why...");
    }

    #[tokio::test]
    async fn test_text_alias_used_when_question_blank() {
        let base = spawn_app(&["GPT"]).await;
        let body: Value = reqwest::Client::new()
            .post(format!("{}/ask", base))
            .json(&json!({"question": "  ", "text": "fallback"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["question"], "fallback");
    }

    #[tokio::test]
    async fn test_missing_question_is_400() {
        let base = spawn_app(&["GPT"]).await;
        for payload in [json!({}), json!({"question": "   "})] {
            let response = reqwest::Client::new()
                .post(format!("{}/ask", base))
                .json(&payload)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({"error": "Missing 'question' field."}));
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected() {
        let base = spawn_app(&["GPT"]).await;
        let response = reqwest::Client::new()
            .post(format!("{}/ask", base))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_json_body_without_content_type_is_accepted() {
        let base = spawn_app(&["GPT"]).await;
        let response = reqwest::Client::new()
            .post(format!("{}/ask", base))
            .header("content-type", "text/plain")
            .body(r#"{"question": "hi"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["question"], "hi");
    }

    #[tokio::test]
    async fn test_liveness_lists_providers() {
        let base = spawn_app(&["GPT", "Gemini"]).await;
        let body: Value = reqwest::get(format!("{}/", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            body,
            json!({"message": "Backend is live", "providers": ["GPT", "Gemini"]})
        );
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let base = spawn_app(&["GPT"]).await;
        let response = reqwest::Client::new()
            .post(format!("{}/ask", base))
            .header("origin", "https://example.com")
            .json(&json!({"question": "hi"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[test]
    fn test_request_alias_precedence() {
        let request = AskRequest {
            question: Some("q".to_string()),
            query: Some("other".to_string()),
            text: None,
        };
        assert_eq!(request.question(), Some("q"));
        assert_eq!(AskRequest::default().question(), None);
    }
}
