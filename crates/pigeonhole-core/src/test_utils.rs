//! Test utilities for pigeonhole-core
//!
//! Provides a mock chat-completion server speaking the same wire format as
//! the real provider, for development and integration tests.

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Sentinel counterparty that makes the mock answer with HTTP 429.
pub const RATE_LIMITED_DESTINATION: &str = "Rate Limited Ltd";

/// Sentinel counterparty that makes the mock answer 200 with no choices.
pub const NO_CHOICES_DESTINATION: &str = "Hollow Response GmbH";

/// Mock chat-completion server for testing and development
pub struct MockChatServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockChatServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat_completions));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockChatServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Models endpoint (health check)
async fn handle_models() -> impl IntoResponse {
    Json(json!({
        "object": "list",
        "data": [
            {"id": "llama3-8b-8192", "object": "model", "owned_by": "Meta"}
        ]
    }))
}

/// Chat completions endpoint
///
/// Replies are keyed off the counterparty embedded in the prompt, matching
/// the prompt text `build_prompt` produces.
async fn handle_chat_completions(Json(request): Json<ChatCompletionRequest>) -> impl IntoResponse {
    let prompt = request
        .messages
        .first()
        .map(|m| m.content.as_str())
        .unwrap_or_default();

    if prompt.contains(RATE_LIMITED_DESTINATION) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": {
                    "message": "Too many requests",
                    "type": "requests",
                    "code": "rate_limit_exceeded"
                }
            })),
        );
    }

    if prompt.contains(NO_CHOICES_DESTINATION) {
        return (
            StatusCode::OK,
            Json(json!({"model": request.model, "choices": []})),
        );
    }

    let guess = classify_mock(prompt);

    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": request.model,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": guess},
                "finish_reason": "stop"
            }]
        })),
    )
}

/// Hardcoded classification guesses for testing/dev purposes
fn classify_mock(prompt: &str) -> &'static str {
    let p = prompt.to_uppercase();

    if p.contains("TRADER JOE") || p.contains("ALDI") || p.contains("SAFEWAY") {
        "Groceries"
    } else if p.contains("LANDLORD") {
        // Trailing whitespace on purpose, to exercise answer cleaning.
        " Rent \n"
    } else if p.contains("ELECTRIC") || p.contains("WATER WORKS") {
        "Utilities"
    } else if p.contains("CINEMA") || p.contains("NETFLIX") {
        // Plausible guess that is usually not in the caller's list.
        "Entertainment\n"
    } else {
        "Other"
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[allow(dead_code)]
    role: String,
    content: String,
}
