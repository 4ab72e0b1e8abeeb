//! Process-local submission repository.
//!
//! Used by tests and by local runs that do not need durability. Records live
//! for as long as the repository value does.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::Submission;
use crate::domain::ports::{SubmissionPersistenceError, SubmissionRepository};

#[derive(Debug, Default)]
struct State {
    rows: Vec<Submission>,
    failure: Option<SubmissionPersistenceError>,
}

/// In-memory [`SubmissionRepository`] with optional failure injection.
#[derive(Debug, Default)]
pub struct InMemorySubmissionRepository {
    state: Mutex<State>,
}

impl InMemorySubmissionRepository {
    /// Make every subsequent operation fail with `failure`, or clear a
    /// previously injected failure with `None`.
    pub fn set_failure(&self, failure: Option<SubmissionPersistenceError>) {
        if let Ok(mut state) = self.state.lock() {
            state.failure = failure;
        }
    }

    /// Number of stored submissions.
    pub fn len(&self) -> usize {
        self.state.lock().map(|state| state.rows.len()).unwrap_or(0)
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn checked(&self) -> Result<MutexGuard<'_, State>, SubmissionPersistenceError> {
        let state = self
            .state
            .lock()
            .map_err(|_| SubmissionPersistenceError::connection("in-memory store poisoned"))?;
        match &state.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: &Submission) -> Result<(), SubmissionPersistenceError> {
        self.checked()?.rows.push(submission.clone());
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<Submission>, SubmissionPersistenceError> {
        let mut rows: Vec<_> = self.checked()?.rows.iter().rev().cloned().collect();
        // Stable sort keeps reverse insertion order between equal timestamps.
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rows)
    }
}
