//! Sink downloading exported files to disk.

use async_trait::async_trait;
use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::path::{Path, PathBuf};
use tokio::{fs, fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, warn};

use super::ResultSink;
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::ProgressDisplay;

/// Streams every exported file into a directory.
///
/// The file name is the last path segment of the result URL. Existing files
/// are left alone unless `overwrite` is set. The body is streamed into a
/// `.part` sibling that only replaces the final path once complete.
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
    client: ClientWithMiddleware,
    overwrite: bool,
}

impl FileSink {
    /// Create a sink writing into `directory` with a default HTTP client.
    ///
    /// Result URLs are pre-signed, so the client carries no API credentials.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let client = create_http_client(HttpClientConfig::default())?;
        Ok(Self::with_client(directory, client))
    }

    /// Create a sink using an existing HTTP client.
    pub fn with_client(directory: impl Into<PathBuf>, client: ClientWithMiddleware) -> Self {
        Self {
            directory: directory.into(),
            client,
            overwrite: false,
        }
    }

    /// Set whether existing files are replaced.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Get the output directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Where the file behind `url` is written.
    pub fn path_for(&self, url: &Url) -> Result<PathBuf> {
        let filename: String = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(|segment| {
                form_urlencoded::parse(segment.as_bytes())
                    .map(|(key, val)| [key, val].concat())
                    .collect()
            })
            .unwrap_or_default();

        if filename.is_empty() || filename == "." || filename == ".." {
            return Err(Error::Delivery(format!(
                "The url \"{}\" does not contain a filename",
                url
            )));
        }
        Ok(self.directory.join(filename))
    }
}

/// Sibling of `output` the body is streamed into before being moved in place.
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

async fn write_body(res: reqwest::Response, partial: &Path, pb: &ProgressBar) -> Result<()> {
    let url = res.url().clone();
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(partial)
        .await?;

    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let mut chunk = item
            .map_err(|e| Error::Delivery(format!("failed to read {}: {}", url, e)))?;
        pb.inc(chunk.len() as u64);
        file.write_all_buf(&mut chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

#[async_trait]
impl ResultSink for FileSink {
    async fn deliver(&self, url: &str, progress: &ProgressDisplay) -> Result<()> {
        let url = Url::parse(url).map_err(|e| {
            Error::Delivery(format!("The url \"{}\" cannot be parsed: {}", url, e))
        })?;
        let output = self.path_for(&url)?;

        if !self.overwrite && output.exists() {
            debug!("{:?} already exists, skipping", output);
            return Ok(());
        }

        debug!("Fetching {}", url);
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Delivery(format!("failed to fetch {}: {}", url, e)))?;
        let res = res
            .error_for_status()
            .map_err(|e| Error::Delivery(format!("failed to fetch {}: {}", url, e)))?;
        let size = res.content_length().unwrap_or(0);

        debug!("Creating destination directory {:?}", self.directory);
        fs::create_dir_all(&self.directory).await?;

        let partial = partial_path(&output);
        debug!("Streaming into {:?}", partial);
        let pb = progress.create_child_progress(size);
        if let Err(e) = write_body(res, &partial, &pb).await {
            progress.abandon_child(pb);
            if let Err(remove) = fs::remove_file(&partial).await {
                warn!("Could not remove {:?}: {}", partial, remove);
            }
            return Err(e);
        }
        progress.finish_child(pb);

        fs::rename(&partial, &output).await?;
        debug!("Wrote {:?}", output);
        Ok(())
    }
}
