//! Per-animation outcome of a run.

use std::fmt::Display;

use crate::catalog::AnimationDescriptor;

/// Export status of one animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Export not attempted yet
    NotStarted,
    /// Export completed and delivered, with the result URL
    Success(String),
    /// Export abandoned, with the reason
    Fail(String),
}

/// Outcome of one animation of the catalog walk.
#[derive(Debug, Clone)]
pub struct Summary {
    animation: AnimationDescriptor,
    page: u32,
    status: Status,
}

impl Summary {
    /// Create a [`Summary`] for an animation listed on `page`.
    pub fn new(animation: AnimationDescriptor, page: u32) -> Self {
        Self {
            animation,
            page,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to the [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Mark the export as failed.
    pub fn fail(self, msg: impl Display) -> Self {
        self.with_status(Status::Fail(msg.to_string()))
    }

    /// Get a reference to the exported animation.
    pub fn animation(&self) -> &AnimationDescriptor {
        &self.animation
    }

    /// Catalog page the animation was listed on.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// The result URL when the export succeeded.
    pub fn result_url(&self) -> Option<&str> {
        match &self.status {
            Status::Success(url) => Some(url),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Status::Success(_))
    }
}
