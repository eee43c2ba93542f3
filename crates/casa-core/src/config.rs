// ── Runtime connection configuration ──
//
// Describes *where* the backend may live and how long to wait for it.
// Never touches disk: the CLI builds a `CasaConfig` (usually through
// `casa-config`) and hands it in.

use std::time::Duration;

use url::Url;

use casa_api::hosts::{DEFAULT_PRIMARY, default_fallbacks};
use casa_api::transport::{DEFAULT_PROBE_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use casa_api::{HostCandidates, TransportConfig};

/// Configuration for talking to one casa backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasaConfig {
    /// Preferred base URL (e.g. `http://192.168.1.20:4000`).
    pub primary: Url,
    /// Base URLs tried after the primary, in order.
    pub fallbacks: Vec<Url>,
    /// Per-host deadline for data requests.
    pub request_timeout: Duration,
    /// Per-host deadline for reachability probes.
    pub probe_timeout: Duration,
}

impl CasaConfig {
    /// A config for `primary` with the built-in LAN fallbacks.
    pub fn new(primary: Url) -> Self {
        Self {
            primary,
            ..Self::default()
        }
    }

    /// Same config without any fallback hosts.
    pub fn without_fallbacks(mut self) -> Self {
        self.fallbacks.clear();
        self
    }

    pub fn candidates(&self) -> HostCandidates {
        HostCandidates::new(self.primary.clone(), self.fallbacks.iter().cloned())
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            request_timeout: self.request_timeout,
            probe_timeout: self.probe_timeout,
            ..TransportConfig::default()
        }
    }
}

impl Default for CasaConfig {
    fn default() -> Self {
        let primary = DEFAULT_PRIMARY
            .parse()
            .unwrap_or_else(|_| unreachable!("DEFAULT_PRIMARY is a valid URL"));
        Self {
            primary,
            fallbacks: default_fallbacks(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}
