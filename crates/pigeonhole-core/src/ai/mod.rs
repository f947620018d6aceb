//! Pluggable completion backend abstraction
//!
//! - `CompletionBackend` trait: the interface every backend implements
//! - `CompletionClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: `GroqBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (groq, mock). Default: groq
//! - `AI_API_KEY`: Provider API key (required for the groq backend)
//! - `AI_MODEL`: Model name (default: llama3-8b-8192)
//! - `AI_BASE_URL`: Provider base URL (default: https://api.groq.com/openai)

mod groq;
mod mock;

pub use groq::GroqBackend;
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for completion backends
///
/// Backends must be Send + Sync to allow concurrent in-flight calls over a
/// single shared handle.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt as a single user-role message and return the first
    /// completion choice's content, unmodified.
    async fn chat_completion(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete completion client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum CompletionClient {
    /// Groq backend (OpenAI-compatible chat-completions API)
    Groq(GroqBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl CompletionClient {
    /// Create a completion client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `groq` (default): requires `AI_API_KEY`; honors `AI_MODEL` and
    ///   `AI_BASE_URL`
    /// - `mock`: creates a mock backend for testing
    pub fn from_env() -> Result<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "groq".to_string());

        match backend.to_lowercase().as_str() {
            "groq" => GroqBackend::from_env().map(CompletionClient::Groq),
            "mock" => Ok(CompletionClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to groq");
                GroqBackend::from_env().map(CompletionClient::Groq)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        CompletionClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            CompletionClient::Groq(b) => CompletionClient::Groq(b.with_model(model)),
            CompletionClient::Mock(b) => CompletionClient::Mock(b.with_model(model)),
        }
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn chat_completion(&self, prompt: &str) -> Result<String> {
        match self {
            CompletionClient::Groq(b) => b.chat_completion(prompt).await,
            CompletionClient::Mock(b) => b.chat_completion(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            CompletionClient::Groq(b) => b.health_check().await,
            CompletionClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            CompletionClient::Groq(b) => b.model(),
            CompletionClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            CompletionClient::Groq(b) => b.host(),
            CompletionClient::Mock(b) => b.host(),
        }
    }
}
