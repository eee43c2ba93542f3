// Shared transport configuration for building the reqwest::Client.
//
// The dispatcher and the reachability probe share one client and one set of
// deadlines through this module.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::Error;

/// Deadline for a data request against a single host.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Deadline for a single reachability probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-host deadline for data requests.
    pub request_timeout: Duration,
    /// Per-host deadline for `/api/ping` probes.
    pub probe_timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: format!("casa/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// No client-level timeout is set: every attempt is bounded by
    /// [`race`](crate::race::race) instead, so one deadline governs both the
    /// exchange and the body read.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(json_headers())
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}

/// `Content-Type` and `Accept` for a JSON API.
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}
