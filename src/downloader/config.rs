//! Configuration of an export run.

use std::sync::Arc;
use std::time::Duration;

use super::summary::Summary;
use crate::catalog::CatalogQuery;
use crate::export::{ExportPreferences, PollOptions};
use crate::http::{Credentials, HttpClientConfig, DEFAULT_BASE_URL};
use crate::progress::StyleOptions;
use crate::sink::{LogSink, ResultSink};

/// Callback type for animation completion events
pub type ExportCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Character every animation is exported for.
    pub character_id: String,
    /// Bearer token and API key.
    pub credentials: Credentials,
    /// Base URL of the catalog API.
    pub base_url: String,
    /// Catalog listing filters.
    pub query: CatalogQuery,
    /// Export output options.
    pub preferences: ExportPreferences,
    /// First catalog page to walk.
    pub start_page: u32,
    /// Pause after each animation, whatever its outcome.
    pub cooldown: Duration,
    /// Job monitor polling.
    pub poll: PollOptions,
    /// HTTP client settings (retries, proxy, extra headers).
    pub http: HttpClientConfig,
    /// Progress bar style options.
    pub style_options: StyleOptions,
    /// Where completed exports go.
    pub sink: Arc<dyn ResultSink>,
    /// Callback for when each animation is processed.
    pub on_complete: Option<Arc<ExportCallback>>,
}

impl DownloaderConfig {
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("character_id", &self.character_id)
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("query", &self.query)
            .field("preferences", &self.preferences)
            .field("start_page", &self.start_page)
            .field("cooldown", &self.cooldown)
            .field("poll", &self.poll)
            .field("http", &self.http)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            character_id: String::new(),
            credentials: Credentials::new(""),
            base_url: DEFAULT_BASE_URL.into(),
            query: CatalogQuery::default(),
            preferences: ExportPreferences::default(),
            start_page: 1,
            cooldown: Self::DEFAULT_COOLDOWN,
            poll: PollOptions::default(),
            http: HttpClientConfig::default(),
            style_options: StyleOptions::default(),
            sink: Arc::new(LogSink),
            on_complete: None,
        }
    }
}
