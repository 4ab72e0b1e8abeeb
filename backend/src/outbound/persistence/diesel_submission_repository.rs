//! PostgreSQL-backed `SubmissionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{SubmissionPersistenceError, SubmissionRepository};
use crate::domain::{RawAge, Submission, SubmissionDraft, SubmissionId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSubmissionRow, SubmissionRow};
use super::pool::{DbPool, PoolError};
use super::schema::submissions;

/// Diesel-backed implementation of the `SubmissionRepository` port.
#[derive(Clone)]
pub struct DieselSubmissionRepository {
    pool: DbPool,
}

impl DieselSubmissionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SubmissionPersistenceError {
    map_basic_pool_error(error, SubmissionPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SubmissionPersistenceError {
    map_basic_diesel_error(
        error,
        SubmissionPersistenceError::query,
        SubmissionPersistenceError::connection,
    )
}

/// Rows are re-validated on the way out so a hand-edited table cannot leak
/// records that break the domain invariants.
fn row_to_submission(row: SubmissionRow) -> Result<Submission, SubmissionPersistenceError> {
    let id = row.id;
    Submission::restore(
        SubmissionId::from_uuid(row.id),
        row.created_at,
        SubmissionDraft {
            name: Some(row.name),
            email: Some(row.email),
            age: Some(RawAge::Integer(i64::from(row.age))),
            message: Some(row.message),
        },
    )
    .map_err(|errors| {
        warn!(%id, %errors, "stored submission violates field rules");
        SubmissionPersistenceError::query(format!("stored submission {id} is invalid"))
    })
}

fn submission_to_row(submission: &Submission) -> NewSubmissionRow<'_> {
    NewSubmissionRow {
        id: *submission.id().as_uuid(),
        name: submission.name(),
        email: submission.email(),
        age: i16::from(submission.age().get()),
        message: submission.message(),
        created_at: submission.created_at(),
    }
}

#[async_trait]
impl SubmissionRepository for DieselSubmissionRepository {
    async fn insert(&self, submission: &Submission) -> Result<(), SubmissionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(submissions::table)
            .values(submission_to_row(submission))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<Submission>, SubmissionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SubmissionRow> = submissions::table
            .order((submissions::created_at.desc(), submissions::seq.desc()))
            .select(SubmissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_submission).collect()
    }
}
