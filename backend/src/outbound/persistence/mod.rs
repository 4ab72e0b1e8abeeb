//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the schema (`schema.rs`) stay private
//! to this module. Connections come from a `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use contact_form::outbound::persistence::{DbPool, DieselSubmissionRepository, PoolConfig};
//!
//! let pool = DbPool::lazy(PoolConfig::new("postgres://localhost/contact_form"));
//! let repo = DieselSubmissionRepository::new(pool);
//! # drop(repo);
//! ```

mod diesel_basic_error_mapping;
mod diesel_submission_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_submission_repository::DieselSubmissionRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
