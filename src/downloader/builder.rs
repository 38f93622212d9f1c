//! Builder pattern implementation for creating Downloader instances.
//!
//! ```rust
//! use mixport::downloader::DownloaderBuilder;
//! use mixport::export::ExportPreferences;
//! use mixport::sink::FileSink;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .character("353d2bdd-d15a-4d39-8a12-4d92911f537e")
//!     .token("eyJhbGciOi...")
//!     .search("dance")
//!     .preferences(ExportPreferences::collada())
//!     .cooldown(Duration::from_secs(5))
//!     .sink(FileSink::new("exports")?)
//!     .build();
//! # Ok(())
//! # }
//! ```

use super::{config::DownloaderConfig, downloader::Downloader, summary::Summary};
use crate::catalog::CatalogQuery;
use crate::export::ExportPreferences;
use crate::http::Credentials;
use crate::progress::StyleOptions;
use crate::sink::ResultSink;

use reqwest::header::{HeaderValue, IntoHeaderName};
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main()  {
/// use mixport::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().character("c-1").token("t").retries(2).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Set the character every animation is exported for.
    pub fn character(mut self, character_id: impl Into<String>) -> Self {
        self.config.character_id = character_id.into();
        self
    }

    /// Set the credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Set the bearer token, keeping the current API key.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        let api_key = self.config.credentials.api_key().to_string();
        self.config.credentials = Credentials::new(token).with_api_key(api_key);
        self
    }

    /// Set the base URL of the catalog API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Replace the catalog listing filters.
    pub fn query(mut self, query: CatalogQuery) -> Self {
        self.config.query = query;
        self
    }

    /// Set the catalog free text search.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.config.query.query = search.into();
        self
    }

    /// Set the number of animations per catalog page.
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.config.query.limit = limit;
        self
    }

    /// Set the first catalog page to walk.
    pub fn start_page(mut self, page: u32) -> Self {
        self.config.start_page = page.max(1);
        self
    }

    /// Set the export output options.
    pub fn preferences(mut self, preferences: ExportPreferences) -> Self {
        self.config.preferences = preferences;
        self
    }

    /// Set the pause after each animation.
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.config.cooldown = cooldown;
        self
    }

    /// Set the pause between two job monitor polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll.interval = interval;
        self
    }

    /// Give up on a job after `max_attempts` monitor polls.
    pub fn max_poll_attempts(mut self, max_attempts: u32) -> Self {
        self.config.poll.max_attempts = Some(max_attempts);
        self
    }

    /// Set the number of retries for transient HTTP failures.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.http.retries = retries;
        self
    }

    /// Route API requests through a proxy.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.http.proxy = Some(proxy);
        self
    }

    /// Add an extra header to every API request.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut headers = self.config.http.headers.take().unwrap_or_default();
        headers.insert(name, value);
        self.config.http.headers = Some(headers);
        self
    }

    /// Set the progress bar style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set where completed exports are delivered.
    pub fn sink<S>(mut self, sink: S) -> Self
    where
        S: ResultSink + 'static,
    {
        self.config.sink = Arc::new(sink);
        self
    }

    /// Set callback for when each animation is processed.
    ///
    /// ```rust
    /// use mixport::downloader::{DownloaderBuilder, Status};
    ///
    /// let downloader = DownloaderBuilder::new()
    ///     .on_complete(|summary| match summary.status() {
    ///         Status::Success(url) => println!("[ok] {} {}", summary.animation().label(), url),
    ///         Status::Fail(error) => println!("[failed] {} {}", summary.animation().label(), error),
    ///         Status::NotStarted => {}
    ///     })
    ///     .build();
    /// ```
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
