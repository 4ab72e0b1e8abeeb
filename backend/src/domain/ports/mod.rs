//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`SubmissionRepository`) are implemented by outbound adapters.
//! Driving ports (`SubmitFormCommand`, `SubmissionsQuery`) are what inbound
//! adapters call; the [`SubmissionStore`](crate::domain::SubmissionStore)
//! service implements both.

mod macros;
pub(crate) use macros::define_port_error;

mod submission_repository;
mod submissions_command;
mod submissions_query;

#[cfg(test)]
pub use submission_repository::MockSubmissionRepository;
pub use submission_repository::{SubmissionPersistenceError, SubmissionRepository};
pub use submissions_command::SubmitFormCommand;
pub use submissions_query::SubmissionsQuery;
