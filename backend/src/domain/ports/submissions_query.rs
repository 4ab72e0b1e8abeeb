//! Driving port for reading stored submissions.

use async_trait::async_trait;

use crate::domain::{Error, Submission};

/// Use-case port for listing submissions.
#[async_trait]
pub trait SubmissionsQuery: Send + Sync {
    /// All stored submissions, newest first.
    async fn list_all(&self) -> Result<Vec<Submission>, Error>;
}
