//! Error handling for the mixport library.
//!
//! Every fallible operation returns [`Error`]. The variants map onto the
//! failure classes of the export workflow: some end the whole run, the rest
//! only abandon the animation currently being exported. Use
//! [`Error::is_fatal`] to tell them apart.

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when using mixport.
#[derive(Error, Debug)]
pub enum Error {
    /// The run is misconfigured (missing character id, missing token, ...).
    ///
    /// Raised before any request is made.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A URL could not be built or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The catalog could not be fetched or decoded.
    ///
    /// Fatal for the whole catalog walk.
    #[error("Network error: {0}")]
    Network(String),

    /// The product lookup or the export request failed.
    #[error("Export request failed: {0}")]
    ExportRequest(String),

    /// The monitor endpoint answered 404 for this character.
    #[error("No export job monitor found for character {character_id}")]
    MonitorNotFound { character_id: String },

    /// The export job reached a failed (or unknown) terminal state.
    #[error("Export job ended with status `{status}`: {message}")]
    JobFailed { status: String, message: String },

    /// The monitor endpoint could not be reached or its body could not be read.
    #[error("Monitor request failed: {0}")]
    MonitorTransport(String),

    /// The monitor endpoint answered with a response the workflow cannot interpret.
    #[error("Unhandled monitor response ({status}): {detail}")]
    UnhandledResponse { status: StatusCode, detail: String },

    /// The job was still processing after the configured number of polls.
    #[error("Export job still processing after {0} polls")]
    PollLimitExceeded(u32),

    /// The result sink could not deliver a completed export.
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

impl Error {
    /// Returns `true` when the error must stop the whole run rather than
    /// only the current animation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::InvalidUrl(_) | Error::Network(_)
        )
    }
}

/// Result type alias for operations that can fail with a mixport error.
pub type Result<T> = std::result::Result<T, Error>;
