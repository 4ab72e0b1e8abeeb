//! Submission create and list use cases.
//!
//! The store validates drafts, assigns identity and creation time, and
//! translates repository failures into domain errors. Store failures keep
//! their adapter message for logs; the HTTP layer redacts it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    SubmissionPersistenceError, SubmissionRepository, SubmissionsQuery, SubmitFormCommand,
};
use crate::domain::{Error, Submission, SubmissionDraft, SubmissionId, validate_submission};

/// Domain service implementing both submission ports.
#[derive(Clone)]
pub struct SubmissionStore<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SubmissionStore<R> {
    /// Create a store over `repo`, stamping records with `clock`.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use contact_form::domain::SubmissionStore;
    /// use contact_form::outbound::memory::InMemorySubmissionRepository;
    ///
    /// let store = SubmissionStore::new(
    ///     Arc::new(InMemorySubmissionRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # drop(store);
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> SubmitFormCommand for SubmissionStore<R>
where
    R: SubmissionRepository,
{
    async fn create(&self, draft: SubmissionDraft) -> Result<Submission, Error> {
        let valid = validate_submission(draft).map_err(|errors| {
            info!(violations = errors.len(), "submission rejected");
            Error::from(errors)
        })?;
        // Stored timestamps keep microseconds; stamp at that precision so the
        // returned record matches later listings.
        let created_at = self.clock.utc().trunc_subsecs(6);
        let submission = valid.into_submission(SubmissionId::random(), created_at);

        self.repo
            .insert(&submission)
            .await
            .map_err(map_persistence_error)?;

        info!(id = %submission.id(), "submission stored");
        Ok(submission)
    }
}

#[async_trait]
impl<R> SubmissionsQuery for SubmissionStore<R>
where
    R: SubmissionRepository,
{
    async fn list_all(&self) -> Result<Vec<Submission>, Error> {
        self.repo
            .list_newest_first()
            .await
            .map_err(map_persistence_error)
    }
}

fn map_persistence_error(error: SubmissionPersistenceError) -> Error {
    warn!(%error, "submission store operation failed");
    match error {
        SubmissionPersistenceError::Connection { message } => Error::store_unavailable(message),
        SubmissionPersistenceError::Query { message } => Error::store_failure(message),
    }
}

#[cfg(test)]
#[path = "submission_store_tests.rs"]
mod tests;
