//! Pigeonhole Core Library
//!
//! Classifies bank-transaction descriptions into a caller-supplied set of
//! categories by delegating the decision to a remote chat-completion API:
//! - Deterministic prompt construction
//! - Pluggable completion backends (Groq, mock)
//! - Answer validation against the allowed category list
//! - Normalized provider errors (status, code, message)

pub mod ai;
pub mod classifier;
pub mod error;
pub mod prompt;

/// Test utilities including the mock chat-completion server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{CompletionBackend, CompletionClient, GroqBackend, MockBackend};
pub use classifier::{Classification, Classifier};
pub use error::{Error, Result};
pub use prompt::build_prompt;
