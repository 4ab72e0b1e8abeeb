//! HTTP server configuration object.

use std::net::SocketAddr;

use contact_form::inbound::http::state::HttpState;
use contact_form::inbound::http::static_assets::StaticAssets;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Everything the server needs besides the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
    pub(crate) assets: StaticAssets,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState, assets: StaticAssets) -> Self {
        Self {
            bind_addr,
            http_state,
            assets,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware and its `/metrics` endpoint.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
