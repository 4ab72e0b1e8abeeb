//! Contact form backend library.
//!
//! Hexagonal layout: `domain` holds the submission model, ports and the
//! `SubmissionStore` service; `inbound::http` adapts actix-web requests;
//! `outbound` provides the PostgreSQL and in-memory repositories.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
