//! The sequential export loop.
//!
//! A run walks the catalog page by page and exports the listed animations
//! strictly one at a time:
//!
//! - **HasItems**: pop the next animation, export it, deliver the result
//!   URL, then cool down. A failed animation is logged and skipped.
//! - **PageExhausted**: fetch the page after the last one, or stop once the
//!   last page has been processed.
//! - **AllPagesDone**: return the summaries.
//!
//! Only catalog failures and misconfiguration end a run early.
//!
//! ```rust,no_run
//! use mixport::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), mixport::Error> {
//! let downloader = DownloaderBuilder::new()
//!     .character("353d2bdd-d15a-4d39-8a12-4d92911f537e")
//!     .token(std::env::var("MIXPORT_TOKEN").unwrap_or_default())
//!     .build();
//!
//! let summaries = downloader.run().await?;
//! let exported = summaries.iter().filter(|s| s.is_success()).count();
//! println!("{}/{} animations exported", exported, summaries.len());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::summary::{Status, Summary};
use crate::catalog::{AnimationDescriptor, CatalogQuery, CatalogWalker, PageCursor};
use crate::error::{Error, Result};
use crate::export::{ExportJobRunner, ExportPreferences, PollOptions};
use crate::http::{create_http_client, ApiClient};
use crate::progress::ProgressDisplay;

use reqwest::Url;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, info, warn};

/// States of the export loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    HasItems,
    PageExhausted,
    AllPagesDone,
}

/// Walks the catalog and exports every animation for one character.
///
/// A downloader is created via its builder:
///
/// ```rust
/// # fn main()  {
/// use mixport::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().character("c-1").token("t").build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the target character id.
    pub fn character_id(&self) -> &str {
        &self.config.character_id
    }

    /// Gets the API base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Gets the catalog listing filters.
    pub fn query(&self) -> &CatalogQuery {
        &self.config.query
    }

    /// Gets the export preferences.
    pub fn preferences(&self) -> &ExportPreferences {
        &self.config.preferences
    }

    /// Gets the first catalog page of the walk.
    pub fn start_page(&self) -> u32 {
        self.config.start_page
    }

    /// Gets the pause after each animation.
    pub fn cooldown(&self) -> Duration {
        self.config.cooldown
    }

    /// Gets the job monitor polling options.
    pub fn poll_options(&self) -> PollOptions {
        self.config.poll
    }

    /// Gets the number of retries for transient HTTP failures.
    pub fn retries(&self) -> u32 {
        self.config.http.retries
    }

    /// Check the configuration without making any request.
    pub fn validate(&self) -> Result<()> {
        if self.config.character_id.trim().is_empty() {
            return Err(Error::Configuration(
                "a target character id is required".into(),
            ));
        }
        if !self.config.credentials.has_token() {
            return Err(Error::Configuration("a bearer token is required".into()));
        }
        Ok(())
    }

    /// Export every animation of the catalog, one at a time.
    ///
    /// Returns one [`Summary`] per processed animation. Fails early only on
    /// configuration errors and catalog failures.
    pub async fn run(&self) -> Result<Vec<Summary>> {
        self.validate()?;

        let base_url = Url::parse(&self.config.base_url).map_err(|e| {
            Error::InvalidUrl(format!(
                "The url \"{}\" cannot be parsed: {}",
                self.config.base_url, e
            ))
        })?;
        let client = create_http_client(self.config.http.clone())?;
        let api = ApiClient::new(client, base_url, self.config.credentials.clone())?;
        let walker = CatalogWalker::new(api.clone(), self.config.query.clone());
        let runner = ExportJobRunner::new(api, self.config.preferences.clone(), self.config.poll);

        let progress = ProgressDisplay::new(self.config.style_options.clone());
        let result = self.walk(&walker, &runner, &progress).await;
        progress.finish();

        if let Ok(summaries) = &result {
            let exported = summaries.iter().filter(|s| s.is_success()).count();
            info!(
                "All pages processed: {} exported, {} failed",
                exported,
                summaries.len() - exported
            );
        }
        result
    }

    async fn walk(
        &self,
        walker: &CatalogWalker,
        runner: &ExportJobRunner,
        progress: &ProgressDisplay,
    ) -> Result<Vec<Summary>> {
        let mut cursor = PageCursor::new(self.config.character_id.trim(), self.config.start_page);
        let mut queue: VecDeque<AnimationDescriptor> = VecDeque::new();
        let mut summaries = Vec::new();
        let mut state = LoopState::PageExhausted;

        while state != LoopState::AllPagesDone {
            state = match state {
                LoopState::HasItems => match queue.pop_front() {
                    Some(animation) => {
                        let page = cursor.current_page().unwrap_or(self.config.start_page);
                        let summary = self
                            .process(runner, progress, cursor.character_id(), animation, page)
                            .await;
                        summaries.push(summary);
                        self.cool_down().await;
                        LoopState::HasItems
                    }
                    None => LoopState::PageExhausted,
                },
                LoopState::PageExhausted => match cursor.next_page() {
                    Some(page) => {
                        let fetched = walker.fetch_page(page).await?;
                        if fetched.current_page != page {
                            warn!(
                                "Requested catalog page {} but the service answered page {}",
                                page, fetched.current_page
                            );
                        }
                        cursor.record(page, fetched.total_pages);
                        info!(
                            "Catalog page {}/{}: {} animations",
                            page,
                            fetched.total_pages,
                            fetched.animations.len()
                        );
                        progress.add_animations(fetched.animations.len());
                        queue.extend(fetched.animations);
                        LoopState::HasItems
                    }
                    None => LoopState::AllPagesDone,
                },
                LoopState::AllPagesDone => LoopState::AllPagesDone,
            };
        }

        Ok(summaries)
    }

    /// Export and deliver one animation. Failures end up in the summary.
    async fn process(
        &self,
        runner: &ExportJobRunner,
        progress: &ProgressDisplay,
        character_id: &str,
        animation: AnimationDescriptor,
        page: u32,
    ) -> Summary {
        progress.start_animation(animation.label());
        let outcome = self.export_one(runner, progress, character_id, &animation).await;
        progress.finish_animation();

        let summary = Summary::new(animation, page);
        let summary = match outcome {
            Ok(url) => summary.with_status(Status::Success(url)),
            Err(e) => {
                warn!(
                    "Skipping \"{}\" ({}): {}",
                    summary.animation().label(),
                    summary.animation().id,
                    e
                );
                summary.fail(e)
            }
        };

        if let Some(ref callback) = self.config.on_complete {
            callback(&summary);
        }
        summary
    }

    async fn export_one(
        &self,
        runner: &ExportJobRunner,
        progress: &ProgressDisplay,
        character_id: &str,
        animation: &AnimationDescriptor,
    ) -> Result<String> {
        let url = runner.export(character_id, animation).await?;
        self.config.sink.deliver(&url, progress).await?;
        Ok(url)
    }

    async fn cool_down(&self) {
        if !self.config.cooldown.is_zero() {
            debug!("Cooling down for {:?}", self.config.cooldown);
            tokio::time::sleep(self.config.cooldown).await;
        }
    }
}
