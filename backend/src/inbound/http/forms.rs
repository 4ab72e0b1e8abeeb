//! Contact form handlers.
//!
//! ```text
//! POST /submit-form {"name":"Ann","email":"ann@x.com","age":"30","message":"hi"}
//! GET /users
//! ```

use actix_web::web::{self, Either};
use actix_web::{HttpResponse, get, post};
use tracing::info;

use crate::domain::SubmissionDraft;
use crate::inbound::http::error::{ApiFailure, ApiResult, Operation};
use crate::inbound::http::state::HttpState;

use super::envelope::{FailureEnvelope, SubmissionListing, SubmitFormRequest, SubmitFormSuccess};

/// Accept a submission as JSON or as a URL-encoded form.
#[utoipa::path(
    post,
    path = "/submit-form",
    request_body(
        content(
            (SubmitFormRequest = "application/json"),
            (SubmitFormRequest = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Submission stored", body = SubmitFormSuccess),
        (status = 400, description = "Invalid submission", body = FailureEnvelope),
        (status = 500, description = "Data store failure", body = FailureEnvelope)
    ),
    tags = ["forms"],
    operation_id = "submitForm"
)]
#[post("/submit-form")]
pub async fn submit_form(
    state: web::Data<HttpState>,
    payload: Either<web::Json<SubmitFormRequest>, web::Form<SubmitFormRequest>>,
) -> ApiResult<HttpResponse> {
    let request = match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let stored = state
        .submissions
        .create(SubmissionDraft::from(request))
        .await
        .map_err(|error| ApiFailure::new(Operation::SubmitForm, error))?;

    info!(id = %stored.id(), "form submitted");
    Ok(HttpResponse::Ok().json(SubmitFormSuccess::new(&stored)))
}

/// List every stored submission, newest first.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Stored submissions", body = SubmissionListing),
        (status = 500, description = "Data store failure", body = FailureEnvelope)
    ),
    tags = ["forms"],
    operation_id = "listSubmissions"
)]
#[get("/users")]
pub async fn list_submissions(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let submissions = state
        .submissions_query
        .list_all()
        .await
        .map_err(|error| ApiFailure::new(Operation::ListSubmissions, error))?;

    Ok(HttpResponse::Ok().json(SubmissionListing::new(&submissions)))
}
