//! Pigeonhole CLI - LLM-backed transaction categorizer
//!
//! Usage:
//!   pigeonhole classify -n "Trader Joe's" -d "POS purchase" -c "Groceries,Rent,Utilities"
//!   pigeonhole health
//!
//! Requires AI_API_KEY in the environment; AI_MODEL and AI_BASE_URL are
//! optional overrides.

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Classify {
            destination,
            description,
            categories,
            model,
            json,
        } => {
            commands::cmd_classify(
                &destination,
                &description,
                &categories,
                model.as_deref(),
                json,
            )
            .await
        }
        Commands::Health => commands::cmd_health().await,
    }
}
