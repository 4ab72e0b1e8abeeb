//! Domain primitives, ports and services.
//!
//! Purpose: define the submission model and its validation rules, the ports
//! adapters implement, and the [`SubmissionStore`] service that ties them
//! together. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Submission, SubmissionDraft, validate_submission: the contact form model.
//! - SubmissionStore: create and list use cases.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod submission;
pub mod submission_store;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::submission::{
    AGE_MAX, AGE_MIN, Age, FieldError, FieldErrorKind, NewSubmission, RawAge, Submission,
    SubmissionDraft, SubmissionField, SubmissionId, SubmissionValidationErrors,
    validate_submission,
};
pub use self::submission_store::SubmissionStore;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
