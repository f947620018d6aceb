//! Mock backend for testing
//!
//! Returns a canned reply for every prompt, or a forced provider error.
//! Useful for unit tests and development without network access.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::CompletionBackend;

/// Mock completion backend
#[derive(Clone)]
pub struct MockBackend {
    /// Reply returned for every prompt
    pub reply: String,
    /// When set, every call fails with this (status, code, message) triple
    pub failure: Option<(u16, String, String)>,
    /// Whether health_check should return true
    pub healthy: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a mock backend answering "Groceries" (healthy by default)
    pub fn new() -> Self {
        Self {
            reply: "Groceries".to_string(),
            failure: None,
            healthy: true,
        }
    }

    /// Create a mock backend with a fixed reply
    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::new()
        }
    }

    /// Create a mock backend that fails every call with a provider error
    pub fn with_failure(status: u16, code: &str, message: &str) -> Self {
        Self {
            failure: Some((status, code.to_string(), message.to_string())),
            healthy: false,
            ..Self::new()
        }
    }

    /// Create a new instance with a different model (no-op for mock)
    pub fn with_model(&self, _model: &str) -> Self {
        self.clone()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn chat_completion(&self, _prompt: &str) -> Result<String> {
        if let Some((status, code, message)) = &self.failure {
            return Err(Error::Provider {
                status: *status,
                code: code.clone(),
                message: message.clone(),
            });
        }
        Ok(self.reply.clone())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
