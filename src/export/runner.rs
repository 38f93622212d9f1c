//! Export job execution: request an export, then poll until it ends.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::request::{ExportPreferences, ExportRequest, ProductDetails};
use super::status::{JobStatus, MonitorResponse};
use crate::catalog::AnimationDescriptor;
use crate::error::{Error, Result};
use crate::http::ApiClient;

/// How the monitor endpoint is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOptions {
    /// Pause between two status requests. Zero polls back to back.
    pub interval: Duration,
    /// Give up after this many status requests. `None` polls forever.
    pub max_attempts: Option<u32>,
}

/// Export job accepted by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct JobHandle {
    /// Character the job was requested for. The monitor is keyed by it.
    pub character_id: String,
    /// Raw acceptance body returned by the service.
    pub response: Value,
}

/// Runs the export protocol for one animation at a time.
#[derive(Debug, Clone)]
pub struct ExportJobRunner {
    api: ApiClient,
    preferences: ExportPreferences,
    poll: PollOptions,
}

impl ExportJobRunner {
    pub fn new(api: ApiClient, preferences: ExportPreferences, poll: PollOptions) -> Self {
        Self {
            api,
            preferences,
            poll,
        }
    }

    /// Get the export preferences.
    pub fn preferences(&self) -> &ExportPreferences {
        &self.preferences
    }

    /// Get the polling options.
    pub fn poll_options(&self) -> PollOptions {
        self.poll
    }

    /// Export `animation` for `character_id` and return the result URL.
    pub async fn export(&self, character_id: &str, animation: &AnimationDescriptor) -> Result<String> {
        let job = self.request_export(character_id, animation).await?;
        self.poll_until_terminal(&job.character_id).await
    }

    /// Look the animation up and ask the service to export it.
    pub async fn request_export(
        &self,
        character_id: &str,
        animation: &AnimationDescriptor,
    ) -> Result<JobHandle> {
        let details = self.fetch_product(character_id, animation).await?;
        let request =
            ExportRequest::new(character_id, animation, details, self.preferences.clone())?;
        let body = serde_json::to_vec(&request)
            .map_err(|e| Error::ExportRequest(format!("failed to encode export request: {}", e)))?;

        info!(
            "Exporting \"{}\" for character {} as {}",
            request.product_name, character_id, request.preferences.format
        );
        let res = self
            .api
            .post(self.api.endpoint("animations/export")?)
            .header("X-Requested-With", "XMLHttpRequest")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::ExportRequest(format!("export request failed: {}", e)))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::ExportRequest(format!(
                "export request answered with status {}",
                status
            )));
        }
        let bytes = res
            .bytes()
            .await
            .map_err(|e| Error::ExportRequest(format!("failed to read export response: {}", e)))?;
        let response: Value = serde_json::from_slice(&bytes)
            .map_err(|e| Error::ExportRequest(format!("export response is not JSON: {}", e)))?;

        Ok(JobHandle {
            character_id: character_id.to_string(),
            response,
        })
    }

    async fn fetch_product(
        &self,
        character_id: &str,
        animation: &AnimationDescriptor,
    ) -> Result<ProductDetails> {
        let mut url = self.api.resource(&["products", &animation.id])?;
        url.query_pairs_mut()
            .append_pair("similar", "0")
            .append_pair("character_id", character_id);

        debug!("Fetching product details of {}", animation.id);
        let res = self.api.get(url).send().await.map_err(|e| {
            Error::ExportRequest(format!("failed to fetch product {}: {}", animation.id, e))
        })?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::ExportRequest(format!(
                "product {} answered with status {}",
                animation.id, status
            )));
        }
        let bytes = res.bytes().await.map_err(|e| {
            Error::ExportRequest(format!("failed to read product {}: {}", animation.id, e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::ExportRequest(format!("failed to decode product {}: {}", animation.id, e))
        })
    }

    /// Poll the job monitor of `character_id` until the job completes or fails.
    ///
    /// Only one job per character is assumed to be running; the monitor is
    /// queried by character alone.
    pub async fn poll_until_terminal(&self, character_id: &str) -> Result<String> {
        let url = self.api.resource(&["characters", character_id, "monitor"])?;
        let mut attempts: u32 = 0;

        loop {
            if let Some(max) = self.poll.max_attempts {
                if attempts >= max {
                    return Err(Error::PollLimitExceeded(attempts));
                }
            }
            if attempts > 0 && !self.poll.interval.is_zero() {
                tokio::time::sleep(self.poll.interval).await;
            }
            attempts += 1;

            let res = self.api.get(url.clone()).send().await.map_err(|e| {
                Error::MonitorTransport(format!("failed to poll monitor of {}: {}", character_id, e))
            })?;

            let status = res.status();
            let monitor: MonitorResponse = match status {
                StatusCode::NOT_FOUND => {
                    warn!("Monitor of character {} not found", character_id);
                    return Err(Error::MonitorNotFound {
                        character_id: character_id.to_string(),
                    });
                }
                StatusCode::OK | StatusCode::ACCEPTED => {
                    let bytes = res.bytes().await.map_err(|e| {
                        Error::MonitorTransport(format!("failed to read monitor response: {}", e))
                    })?;
                    serde_json::from_slice(&bytes).map_err(|e| Error::UnhandledResponse {
                        status,
                        detail: format!("monitor response is not valid JSON: {}", e),
                    })?
                }
                other => {
                    return Err(Error::UnhandledResponse {
                        status: other,
                        detail: "response not handled".into(),
                    })
                }
            };

            match monitor.job_status() {
                JobStatus::Processing => {
                    debug!("Export job of {} is processing (poll #{})", character_id, attempts);
                }
                JobStatus::Completed => {
                    return match monitor.result_url() {
                        Some(url) => {
                            info!("Export job of {} completed: {}", character_id, url);
                            Ok(url.to_string())
                        }
                        None => Err(Error::JobFailed {
                            status: monitor.status.clone(),
                            message: format!(
                                "completed without a result url: {}",
                                monitor.diagnostic()
                            ),
                        }),
                    };
                }
                JobStatus::Failed | JobStatus::Unrecognized(_) => {
                    warn!(
                        "Export job of {} ended with status `{}`: {}",
                        character_id,
                        monitor.status,
                        monitor.diagnostic()
                    );
                    return Err(Error::JobFailed {
                        status: monitor.status.clone(),
                        message: monitor.diagnostic(),
                    });
                }
            }
        }
    }
}
