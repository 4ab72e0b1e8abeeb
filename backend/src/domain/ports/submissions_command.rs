//! Driving port for accepting form submissions.
//!
//! The HTTP adapter hands over a raw [`SubmissionDraft`] and receives either
//! the stored [`Submission`] or a domain [`Error`] whose code selects the
//! response status.

use async_trait::async_trait;

use crate::domain::{Error, Submission, SubmissionDraft};

/// Use-case port for creating submissions.
#[async_trait]
pub trait SubmitFormCommand: Send + Sync {
    /// Validate, stamp and persist a submission.
    async fn create(&self, draft: SubmissionDraft) -> Result<Submission, Error>;
}
