//! Export every animation of the catalog for one character.
//!
//! ```text
//! MIXPORT_TOKEN=... MIXPORT_CHARACTER=353d2bdd-... cargo run --example export_all
//! ```
//!
//! Optional: `MIXPORT_OUTPUT` (default `exports`), `MIXPORT_QUERY` (default
//! `pose`), `MIXPORT_FORMAT` (default `fbx7_2019`), `RUST_LOG`.

use color_eyre::{eyre::eyre, Result};
use mixport::downloader::{DownloaderBuilder, Status};
use mixport::export::ExportPreferences;
use mixport::sink::FileSink;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mixport=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let token = env::var("MIXPORT_TOKEN").map_err(|_| eyre!("MIXPORT_TOKEN is not set"))?;
    let character = env::var("MIXPORT_CHARACTER").unwrap_or_default();
    let output = env::var("MIXPORT_OUTPUT").unwrap_or_else(|_| "exports".into());
    let query = env::var("MIXPORT_QUERY").unwrap_or_else(|_| "pose".into());
    let preferences = match env::var("MIXPORT_FORMAT") {
        Ok(format) => ExportPreferences {
            format,
            ..ExportPreferences::default()
        },
        Err(_) => ExportPreferences::default(),
    };

    let downloader = DownloaderBuilder::new()
        .character(character)
        .token(token)
        .search(query)
        .preferences(preferences)
        .sink(FileSink::new(output.clone())?)
        .on_complete(|summary| {
            if let Status::Fail(reason) = summary.status() {
                eprintln!("[failed] {}: {}", summary.animation().label(), reason);
            }
        })
        .build();

    let summaries = downloader.run().await?;
    let exported = summaries.iter().filter(|s| s.is_success()).count();
    println!(
        "\nDone! Exported {}/{} animations into {}.",
        exported,
        summaries.len(),
        output
    );

    Ok(())
}
