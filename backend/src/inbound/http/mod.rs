//! HTTP inbound adapter serving the contact form.

pub mod envelope;
pub mod error;
pub mod forms;
pub mod health;
pub mod state;
pub mod static_assets;

use actix_web::web;

pub use error::ApiResult;

/// Body extractor settings whose error handlers emit the failure envelope.
pub fn payload_configs() -> (web::JsonConfig, web::FormConfig) {
    (
        web::JsonConfig::default().error_handler(error::json_payload_error),
        web::FormConfig::default().error_handler(error::form_payload_error),
    )
}

/// Register the form, health and static routes.
///
/// The static catch-all is registered last; mount anything else (API docs,
/// metrics) before calling this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let (json_config, form_config) = payload_configs();
    cfg.app_data(json_config)
        .app_data(form_config)
        .service(forms::submit_form)
        .service(forms::list_submissions)
        .service(health::ready)
        .service(health::live)
        .service(static_assets::index)
        .service(static_assets::asset);
}
