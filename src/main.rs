mod diagnostics;
mod error;
mod parser;
mod record;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "docslicer",
    about = "Slice an API-reference HTML page into per-endpoint JSON records"
)]
struct Cli {
    /// Path to the API-reference HTML page
    input: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Also dump unknown-tag counts to stderr as JSON
    #[arg(long)]
    diagnostics: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let html = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let extraction = parser::extract_str(&html)
        .with_context(|| format!("extracting endpoints from {}", cli.input.display()))?;
    info!(
        endpoints = extraction.doc.endpoints.len(),
        "extraction complete"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&extraction.doc)?
    } else {
        serde_json::to_string(&extraction.doc)?
    };
    println!("{json}");

    if !extraction.diagnostics.is_empty() {
        info!(
            distinct_tags = extraction.diagnostics.unknown_tags.len(),
            "some markup was not recognized; text under those tags was dropped"
        );
        if cli.diagnostics {
            eprintln!("{}", serde_json::to_string_pretty(&extraction.diagnostics)?);
        }
    }

    Ok(())
}
