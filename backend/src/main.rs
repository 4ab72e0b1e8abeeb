//! Contact form entry-point: reads configuration, prepares the data store and
//! serves the form, the submission API and the static assets.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contact_form::domain::SubmissionStore;
use contact_form::inbound::http::health::HealthState;
use contact_form::inbound::http::state::HttpState;
use contact_form::inbound::http::static_assets::StaticAssets;
use contact_form::outbound::persistence::{
    DbPool, DieselSubmissionRepository, PoolConfig, run_pending_migrations,
};
use contact_form::settings::{StoreSettings, service_settings_from_env};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = service_settings_from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    let store_settings = StoreSettings::load_from_iter([OsString::from("contact-form")])
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let assets = StaticAssets::open(&settings.public_dir).map_err(|e| {
        std::io::Error::other(format!(
            "failed to open public directory {}: {e}",
            settings.public_dir.display()
        ))
    })?;

    let pool = DbPool::lazy(
        PoolConfig::new(settings.database_url.clone())
            .with_max_size(store_settings.max_connections())
            .with_connection_timeout(store_settings.connect_timeout()),
    );
    prepare_store(&pool, &settings.database_url, &store_settings).await;

    let store = SubmissionStore::new(
        Arc::new(DieselSubmissionRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    let config = ServerConfig::new(
        settings.bind_addr,
        HttpState::from_service(Arc::new(store)),
        assets,
    );
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let (server, bound) = create_server(health_state.clone(), config)?;
    info!(addr = %bound, "contact form listening");

    let drain_health = health_state.clone();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            drain_health.mark_unhealthy();
            info!("shutdown requested; draining connections");
        }
    });

    let result = server.await;
    health_state.mark_unhealthy();
    info!(
        open = pool.open_connections(),
        "closing data store connections"
    );
    drop(pool);
    result
}

/// Apply migrations or, when disabled, check that the store is reachable.
/// Failures are logged; store-backed requests fail until the store recovers.
async fn prepare_store(pool: &DbPool, database_url: &str, settings: &StoreSettings) {
    if settings.run_migrations() {
        if let Err(e) = run_pending_migrations(database_url.to_owned()).await {
            error!(error = %e, "database migrations failed; continuing without them");
        }
        return;
    }
    match pool.get().await {
        Ok(_) => info!("data store reachable"),
        Err(e) => error!(error = %e, "data store unreachable at startup"),
    }
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    actix_web_prom::PrometheusMetricsBuilder::new("contact_form")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}
