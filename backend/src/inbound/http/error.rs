//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the failure envelope. Status codes
//! are chosen here and nowhere else.

use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::envelope::FailureEnvelope;

/// The endpoint an error belongs to; selects the envelope `message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SubmitForm,
    ListSubmissions,
}

impl Operation {
    pub fn message(self) -> &'static str {
        match self {
            Self::SubmitForm => "Error submitting form",
            Self::ListSubmissions => "Error retrieving users",
        }
    }
}

/// A domain error raised while serving `operation`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}: {error}", .operation.message())]
pub struct ApiFailure {
    operation: Operation,
    error: Error,
}

impl ApiFailure {
    pub fn new(operation: Operation, error: Error) -> Self {
        Self { operation, error }
    }

    fn envelope(&self) -> FailureEnvelope {
        let error = redact_if_store(&self.error);
        FailureEnvelope {
            success: false,
            message: self.operation.message().to_owned(),
            error: error.message().to_owned(),
            code: error.code(),
            details: error.details().cloned(),
        }
    }
}

/// Result alias for form handlers.
pub type ApiResult<T> = Result<T, ApiFailure>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::StoreUnavailable | ErrorCode::StoreFailure => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn redact_if_store(error: &Error) -> Error {
    let generic = match error.code() {
        ErrorCode::StoreUnavailable => "Data store unavailable",
        ErrorCode::StoreFailure => "Internal server error",
        ErrorCode::ValidationFailed => return error.clone(),
    };
    let mut redacted = Error::new(error.code(), generic);
    if let Some(id) = error.trace_id() {
        redacted = redacted.with_trace_id(id.to_owned());
    }
    redacted
}

impl ResponseError for ApiFailure {
    fn status_code(&self) -> StatusCode {
        status_for(self.error.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = ?self.error.code(),
                error = %self.error,
                trace_id = self.error.trace_id(),
                "{}",
                self.operation.message()
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.error.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self.envelope())
    }
}

/// `JsonConfig` error handler rendering undecodable bodies as validation
/// failures of the form submission.
pub fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = match &err {
        JsonPayloadError::ContentType => {
            "request body must be JSON or a URL-encoded form".to_owned()
        }
        other => format!("request body could not be decoded: {other}"),
    };
    debug!(error = %err, "rejected submission payload");
    ApiFailure::new(Operation::SubmitForm, Error::validation(reason)).into()
}

/// `FormConfig` error handler; see [`json_payload_error`].
pub fn form_payload_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected submission form");
    ApiFailure::new(
        Operation::SubmitForm,
        Error::validation(format!("form body could not be decoded: {err}")),
    )
    .into()
}
