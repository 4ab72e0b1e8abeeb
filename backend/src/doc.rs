//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the form endpoints, the health probes and the
//! envelope schemas. Swagger UI serves it at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::envelope::{
    AgeField, FailureEnvelope, SubmissionBody, SubmissionListing, SubmitFormRequest,
    SubmitFormSuccess, TextField,
};

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contact form API",
        description = "Accepts contact form submissions and lists stored submissions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::forms::submit_form,
        crate::inbound::http::forms::list_submissions,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SubmitFormRequest,
        TextField,
        AgeField,
        SubmissionBody,
        SubmitFormSuccess,
        SubmissionListing,
        FailureEnvelope,
        ErrorCode
    )),
    tags(
        (name = "forms", description = "Contact form submissions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
