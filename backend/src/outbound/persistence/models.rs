//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::submissions;

/// Row struct for reading from the submissions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubmissionRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i16,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new submission records. `seq` is left to the
/// database default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submissions)]
pub(crate) struct NewSubmissionRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub age: i16,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}
