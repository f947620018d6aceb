//! Integration tests for pigeonhole-core
//!
//! These tests exercise the full prompt → provider → validation flow against
//! the in-process mock chat-completion server. They require the `test-utils`
//! feature: `cargo test --features test-utils`.

use pigeonhole_core::test_utils::{
    MockChatServer, NO_CHOICES_DESTINATION, RATE_LIMITED_DESTINATION,
};
use pigeonhole_core::{Classifier, CompletionClient, Error, GroqBackend};

fn categories(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn classifier_for(server: &MockChatServer) -> Classifier {
    let backend = GroqBackend::new(&server.url(), "test-model", "gsk-test");
    Classifier::new(CompletionClient::Groq(backend))
}

#[tokio::test]
async fn test_classifies_grocery_transaction() {
    let server = MockChatServer::start().await;
    let classifier = classifier_for(&server);
    let cats = categories(&["Groceries", "Rent", "Utilities"]);

    let result = classifier
        .classify(&cats, "Trader Joe's", "POS purchase")
        .await
        .unwrap()
        .expect("should match");

    assert_eq!(result.category, "Groceries");
    assert!(result.prompt.contains("Groceries, Rent, Utilities"));
    assert!(result.prompt.contains("Trader Joe's"));
    assert!(result.prompt.contains("POS purchase"));
}

#[tokio::test]
async fn test_answer_whitespace_is_cleaned_before_matching() {
    let server = MockChatServer::start().await;
    let classifier = classifier_for(&server);
    let cats = categories(&["Groceries", "Rent", "Utilities"]);

    // The mock answers " Rent \n" for landlord transactions.
    let result = classifier
        .classify(&cats, "Landlord Ltd", "monthly rent")
        .await
        .unwrap()
        .expect("should match");

    assert_eq!(result.category, "Rent");
    assert_eq!(result.response, " Rent \n");
}

#[tokio::test]
async fn test_off_list_guess_returns_none() {
    let server = MockChatServer::start().await;
    let classifier = classifier_for(&server);
    let cats = categories(&["Groceries", "Rent", "Utilities"]);

    // The mock guesses "Entertainment\n", which is not in the list.
    let result = classifier
        .classify(&cats, "Cinema City", "two tickets")
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_rate_limit_surfaces_as_provider_error() {
    let server = MockChatServer::start().await;
    let classifier = classifier_for(&server);
    let cats = categories(&["Groceries", "Rent", "Utilities"]);

    let err = classifier
        .classify(&cats, RATE_LIMITED_DESTINATION, "POS purchase")
        .await
        .unwrap_err();

    match err {
        Error::Provider {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 429);
            assert_eq!(code, "rate_limit_exceeded");
            assert_eq!(message, "Too many requests");
        }
        other => panic!("expected provider error, got {other}"),
    }
}

#[tokio::test]
async fn test_empty_choices_surfaces_as_malformed_response() {
    let server = MockChatServer::start().await;
    let classifier = classifier_for(&server);
    let cats = categories(&["Groceries"]);

    let err = classifier
        .classify(&cats, NO_CHOICES_DESTINATION, "POS purchase")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_classifier() {
    let server = MockChatServer::start().await;
    let classifier = classifier_for(&server);
    let cats = categories(&["Groceries", "Rent", "Utilities"]);

    let a = classifier.classify(&cats, "Aldi", "card payment");
    let b = classifier.classify(&cats, "City Electric", "monthly bill");
    let (a, b) = tokio::join!(a, b);

    assert_eq!(a.unwrap().unwrap().category, "Groceries");
    assert_eq!(b.unwrap().unwrap().category, "Utilities");
}
