//! Downloader module: the export loop, its builder and configuration.
//!
//! - `downloader` - [`Downloader`] running the sequential export loop
//! - `builder` - [`DownloaderBuilder`]
//! - `config` - [`DownloaderConfig`] and the callback type
//! - `summary` - per-animation [`Summary`] and [`Status`]
//!
//! # Example
//!
//! ```rust,no_run
//! use mixport::downloader::{DownloaderBuilder, Status};
//! use mixport::sink::FileSink;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .character("353d2bdd-d15a-4d39-8a12-4d92911f537e")
//!     .token("eyJhbGciOi...")
//!     .sink(FileSink::new("exports")?)
//!     .on_complete(|summary| {
//!         if let Status::Fail(reason) = summary.status() {
//!             eprintln!("{} failed: {}", summary.animation().label(), reason);
//!         }
//!     })
//!     .build();
//!
//! downloader.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;
pub mod summary;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, ExportCallback};
pub use downloader::Downloader;
pub use summary::{Status, Summary};
