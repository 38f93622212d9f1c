//! mixport walks a paginated animation catalog, asks the service to export
//! every animation for one character, waits for each export job to finish
//! and hands the resulting download links to a [`ResultSink`].
//!
//! Animations are exported strictly one at a time, with a fixed cooldown
//! between two of them. A failed animation is skipped; only catalog failures
//! and misconfiguration stop a run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mixport::{DownloaderBuilder, FileSink, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .character("353d2bdd-d15a-4d39-8a12-4d92911f537e")
//!     .token("eyJhbGciOi...")
//!     .sink(FileSink::new("exports")?)
//!     .build();
//! let summaries = downloader.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`catalog`] - catalog pages and the `CatalogWalker`
//! - [`export`] - export payloads, job status and the `ExportJobRunner`
//! - [`downloader`] - the sequential export loop and its builder
//! - [`sink`] - destinations for completed exports
//! - [`error`] - the `Error` enum
//! - [`http`] - HTTP client, credentials and API access
//! - [`progress`] - progress bar styling and display

pub mod catalog;
pub mod downloader;
pub mod error;
pub mod export;
pub mod http;
pub mod progress;
pub mod sink;

pub use catalog::{AnimationDescriptor, CatalogPage, CatalogQuery, CatalogWalker, PageCursor};
pub use downloader::{Downloader, DownloaderBuilder, Status, Summary};
pub use error::{Error, Result};
pub use export::{flatten_params, ExportJobRunner, ExportPreferences, JobStatus, PollOptions};
pub use http::{create_http_client, ApiClient, Credentials, HttpClientConfig};
pub use progress::{ProgressBarOpts, ProgressDisplay, StyleOptions};
pub use sink::{FileSink, LogSink, MemorySink, ResultSink};
