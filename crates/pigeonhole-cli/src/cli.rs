//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};

/// Pigeonhole - Categorize bank transactions with an LLM
#[derive(Parser)]
#[command(name = "pigeonhole")]
#[command(about = "Classify bank transactions into your own categories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify one transaction
    Classify {
        /// Counterparty on the transaction (e.g., "Trader Joe's")
        #[arg(short = 'n', long)]
        destination: String,

        /// Free-text transaction subject (e.g., "POS purchase")
        #[arg(short = 'd', long)]
        description: String,

        /// Comma-separated list of allowed categories
        #[arg(short, long)]
        categories: String,

        /// Override the configured model for this call
        #[arg(short, long)]
        model: Option<String>,

        /// Print the full result (prompt, raw response, category) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the completion provider is reachable
    Health,
}
