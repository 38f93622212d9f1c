//! Export jobs.
//!
//! Exporting one animation is a two phase protocol:
//!
//! 1. [`ExportJobRunner::request_export`] looks the product up, flattens its
//!    parameter set and posts the export request.
//! 2. [`ExportJobRunner::poll_until_terminal`] polls the character's job
//!    monitor until the job completes (returning the result URL) or fails.
//!
//! [`ExportJobRunner::export`] chains both.
//!
//! - [`request`] - export payload and parameter flattening
//! - [`status`] - monitor responses and [`JobStatus`]
//! - [`runner`] - the [`ExportJobRunner`]

pub mod request;
pub mod runner;
pub mod status;

pub use request::{flatten_gms_hash, flatten_params, ExportPreferences, ExportRequest};
pub use runner::{ExportJobRunner, JobHandle, PollOptions};
pub use status::{JobStatus, MonitorResponse};
