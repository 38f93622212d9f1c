//! Destinations for completed exports.
//!
//! The export loop never downloads anything itself: each result URL is handed
//! to a [`ResultSink`].
//!
//! - [`FileSink`] streams the exported file into a directory
//! - [`LogSink`] only reports the URL
//! - [`MemorySink`] keeps the URLs in memory
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use mixport::progress::ProgressDisplay;
//! use mixport::sink::ResultSink;
//!
//! struct Stdout;
//!
//! #[async_trait]
//! impl ResultSink for Stdout {
//!     async fn deliver(&self, url: &str, _progress: &ProgressDisplay) -> mixport::Result<()> {
//!         println!("{}", url);
//!         Ok(())
//!     }
//! }
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::error::Result;
use crate::progress::ProgressDisplay;

pub mod file;

pub use file::FileSink;

/// Receives the result URL of every completed export.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Deliver one result URL. An error fails the current animation only.
    async fn deliver(&self, url: &str, progress: &ProgressDisplay) -> Result<()>;
}

/// Sink reporting result URLs through `tracing` and above the progress bars.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl ResultSink for LogSink {
    async fn deliver(&self, url: &str, progress: &ProgressDisplay) -> Result<()> {
        info!("Export ready: {}", url);
        progress.println(url);
        Ok(())
    }
}

/// Sink collecting result URLs in memory. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    urls: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs delivered so far, in delivery order.
    pub fn urls(&self) -> Vec<String> {
        match self.urls.lock() {
            Ok(urls) => urls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn deliver(&self, url: &str, _progress: &ProgressDisplay) -> Result<()> {
        match self.urls.lock() {
            Ok(mut urls) => urls.push(url.to_string()),
            Err(poisoned) => poisoned.into_inner().push(url.to_string()),
        }
        Ok(())
    }
}
