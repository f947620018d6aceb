//! Transaction classifier
//!
//! Delegates the classification decision to a completion backend: builds the
//! prompt, sends one request, and validates the textual answer against the
//! caller's category list.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::{CompletionBackend, CompletionClient};
use crate::error::Result;
use crate::prompt::build_prompt;

/// Outcome of a successful classification
///
/// `category` is guaranteed to be a member of the category list the caller
/// passed in; `response` is the provider's raw answer before any cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub prompt: String,
    pub response: String,
    pub category: String,
}

/// Classifies bank transactions into a caller-supplied category set
///
/// Stateless across calls apart from the immutable client handle, so one
/// instance is safe to share across concurrent `classify` calls. Performs no
/// retries; the first failure is terminal for that call.
#[derive(Clone)]
pub struct Classifier {
    client: CompletionClient,
}

impl Classifier {
    /// Create a classifier over an existing completion client
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    /// Create a classifier from environment variables
    ///
    /// Fails fast with a configuration error when `AI_API_KEY` is missing.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(CompletionClient::from_env()?))
    }

    /// Access the underlying completion client
    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    /// Classify one transaction into one of `categories`.
    ///
    /// Returns `Ok(Some(..))` when the provider's cleaned answer exactly
    /// matches a category, `Ok(None)` when it matches nothing (an expected
    /// outcome, logged as a warning), and an error only for transport or
    /// provider failures.
    ///
    /// Matching is exact and case-sensitive: embedded newlines are removed
    /// and surrounding whitespace trimmed, but no case or punctuation
    /// normalization is applied. An empty `categories` slice can never
    /// match.
    pub async fn classify(
        &self,
        categories: &[String],
        destination_name: &str,
        description: &str,
    ) -> Result<Option<Classification>> {
        let prompt = build_prompt(categories, destination_name, description);

        let response = self.client.chat_completion(&prompt).await?;
        debug!(model = %self.client.model(), raw = %response, "Provider answered");

        let guess = clean_guess(&response);

        if !categories.iter().any(|c| c == &guess) {
            warn!(
                prompt = %prompt,
                guess = %guess,
                "Provider could not classify the transaction"
            );
            return Ok(None);
        }

        Ok(Some(Classification {
            prompt,
            response,
            category: guess,
        }))
    }
}

/// Remove embedded newlines and surrounding whitespace from a raw guess.
fn clean_guess(raw: &str) -> String {
    raw.replace('\n', "").trim().to_string()
}
