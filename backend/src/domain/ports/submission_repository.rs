//! Driven port for submission persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::Submission;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by submission repository adapters.
    pub enum SubmissionPersistenceError {
        /// The store could not be reached or dropped the connection.
        Connection { message: String } => "submission store connection failed: {message}",
        /// A query or write failed, or a stored row could not be read back.
        Query { message: String } => "submission store query failed: {message}",
    }
}

/// Durable storage for submissions.
///
/// Implementations store exactly what they are given; validation and identity
/// assignment happen before `insert` is called.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persist a new submission.
    async fn insert(&self, submission: &Submission) -> Result<(), SubmissionPersistenceError>;

    /// Every stored submission, newest first. Submissions sharing a
    /// timestamp are returned in reverse insertion order.
    async fn list_newest_first(&self) -> Result<Vec<Submission>, SubmissionPersistenceError>;
}
