//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use contact_form::Trace;
#[cfg(debug_assertions)]
use contact_form::doc::ApiDoc;
use contact_form::inbound::http;
use contact_form::inbound::http::health::HealthState;
use contact_form::inbound::http::state::HttpState;
use contact_form::inbound::http::static_assets::StaticAssets;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    assets: web::Data<StaticAssets>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        assets,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(assets)
        .wrap(Trace);

    // Mounted ahead of the static catch-all registered by `http::configure`.
    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.configure(http::configure)
}

/// Construct the HTTP server and bind its listener.
///
/// Returns the server, which must be awaited to drive the listener, and the
/// address actually bound (useful when binding port 0). Readiness is marked
/// once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<(Server, SocketAddr)> {
    let bind_addr = config.bind_addr();
    let ServerConfig {
        bind_addr: _,
        http_state,
        assets,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        assets: web::Data::new(assets),
    };

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(deps.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?;
    let bound = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| std::io::Error::other("server bound no addresses"))?;
    let server = server.run();

    health_state.mark_ready();
    Ok((server, bound))
}
