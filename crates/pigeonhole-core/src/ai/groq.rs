//! Groq backend implementation
//!
//! Speaks the OpenAI chat-completions wire format against Groq's hosted
//! endpoint, or against any server exposing the same API (useful for
//! pointing at a mock server in tests).
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_API_KEY`: API key (required)
//! - `AI_MODEL`: Model name (default: llama3-8b-8192)
//! - `AI_BASE_URL`: Server URL (default: https://api.groq.com/openai)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{Error, Result};

use super::CompletionBackend;

/// Default Groq endpoint; `/v1/chat/completions` is appended per request.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";

/// Default model used for classification.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Groq chat-completions backend
///
/// Holds only immutable configuration plus a shared reqwest client, so a
/// single handle is safe to reuse across concurrent in-flight calls.
#[derive(Clone)]
pub struct GroqBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GroqBackend {
    /// Create a new Groq backend
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create a new instance with a different model
    ///
    /// Used for runtime model override (e.g., `--model` on the CLI).
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
            api_key: self.api_key.clone(),
        }
    }

    /// Create from environment variables
    ///
    /// Required: `AI_API_KEY`
    /// Optional: `AI_MODEL` (default: llama3-8b-8192)
    /// Optional: `AI_BASE_URL` (default: https://api.groq.com/openai)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("AI_API_KEY")
            .map_err(|_| Error::Config("AI_API_KEY not set".to_string()))?;
        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(&base_url, &model, &api_key))
    }
}

#[async_trait]
impl CompletionBackend for GroqBackend {
    async fn chat_completion(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let (code, message) = parse_error_envelope(&body);
            error!(status, code = %code, message = %message, "Provider rejected the request");
            return Err(Error::Provider {
                status,
                code,
                message,
            });
        }

        let chat_response: ChatCompletionResponse = response.json().await?;
        debug!(model = %self.model, "Received chat completion");

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::MalformedResponse("response contained no choices".into()))
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

/// Extract (code, message) from an OpenAI-style error envelope.
///
/// Falls back to code "unknown" with the raw body as message when the body
/// is not the expected JSON shape.
fn parse_error_envelope(body: &str) -> (String, String) {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope
                .error
                .code
                .or(envelope.error.kind)
                .unwrap_or_else(|| "unknown".to_string());
            (code, envelope.error.message)
        }
        Err(_) => ("unknown".to_string(), body.to_string()),
    }
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

/// Chat completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

/// Chat response message
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Provider error envelope, OpenAI wire format
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_new() {
        let backend = GroqBackend::new("http://localhost:8080", "llama3-8b-8192", "gsk-test");
        assert_eq!(backend.model(), "llama3-8b-8192");
        assert_eq!(backend.host(), "http://localhost:8080");
    }

    #[test]
    fn test_backend_new_trims_trailing_slash() {
        let backend = GroqBackend::new("http://localhost:8080/", "llama3-8b-8192", "gsk-test");
        assert_eq!(backend.host(), "http://localhost:8080");
    }

    #[test]
    fn test_backend_with_model() {
        let backend = GroqBackend::new("http://localhost:8080", "llama3-8b-8192", "gsk-test");
        let other = backend.with_model("mixtral-8x7b-32768");
        assert_eq!(other.model(), "mixtral-8x7b-32768");
        assert_eq!(other.host(), backend.host());
    }

    #[test]
    fn test_backend_from_env_missing_key() {
        std::env::remove_var("AI_API_KEY");
        let result = GroqBackend::from_env();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_chat_completion_request_serialization() {
        let request = ChatCompletionRequest {
            model: "llama3-8b-8192".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Hello".to_string(),
            }],
            stream: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3-8b-8192");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_chat_completion_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "llama3-8b-8192",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Groceries"
                },
                "finish_reason": "stop"
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, "Groceries");
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"error": {"message": "Too many requests", "type": "requests", "code": "rate_limit_exceeded"}}"#;
        let (code, message) = parse_error_envelope(body);
        assert_eq!(code, "rate_limit_exceeded");
        assert_eq!(message, "Too many requests");
    }

    #[test]
    fn test_parse_error_envelope_code_falls_back_to_type() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        let (code, message) = parse_error_envelope(body);
        assert_eq!(code, "invalid_request_error");
        assert_eq!(message, "Invalid API Key");
    }

    #[test]
    fn test_parse_error_envelope_not_json() {
        let (code, message) = parse_error_envelope("upstream gateway timeout");
        assert_eq!(code, "unknown");
        assert_eq!(message, "upstream gateway timeout");
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let backend = GroqBackend::new("http://127.0.0.1:1", "llama3-8b-8192", "gsk-test");
        assert!(!backend.health_check().await);
    }
}
