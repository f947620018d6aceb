//! CLI command implementations

use anyhow::{Context, Result};
use pigeonhole_core::{Classifier, CompletionBackend, CompletionClient};

/// Split a comma-separated category list into labels.
///
/// Surrounding whitespace is stripped per label; empty segments are dropped.
/// Duplicates are kept as-is, matching the classifier's contract.
pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Classify one transaction and print the outcome
pub async fn cmd_classify(
    destination: &str,
    description: &str,
    categories_raw: &str,
    model: Option<&str>,
    json: bool,
) -> Result<()> {
    let categories = parse_categories(categories_raw);
    if categories.is_empty() {
        anyhow::bail!("no categories given; pass --categories \"Groceries,Rent,...\"");
    }

    let mut classifier =
        Classifier::from_env().context("Failed to configure the completion provider")?;
    if let Some(model) = model {
        classifier = Classifier::new(classifier.client().with_model(model));
    }

    let result = classifier
        .classify(&categories, destination, description)
        .await
        .context("Classification request failed")?;

    match result {
        Some(classification) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&classification)?);
            } else {
                println!("✅ {}", classification.category);
            }
        }
        None => {
            eprintln!("⚠️  The provider's guess matched none of your categories");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Check provider reachability
pub async fn cmd_health() -> Result<()> {
    let client =
        CompletionClient::from_env().context("Failed to configure the completion provider")?;

    print!("Checking {} ({})... ", client.host(), client.model());
    if client.health_check().await {
        println!("✅ Reachable");
        Ok(())
    } else {
        println!("❌ Unreachable");
        std::process::exit(1);
    }
}
