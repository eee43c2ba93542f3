// ── Host resolution ──
//
// Decides the order in which a request visits the candidate hosts. With a
// remembered host the order is purely computed; without one, a quick probe
// of `/api/ping` on each candidate picks the head and seeds the memory.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::endpoints;
use crate::error::Error;
use crate::hosts::{HostCandidates, join_endpoint, order_hosts};
use crate::memory::ConnectionMemory;
use crate::race::race;

/// Attempt-order resolver over a fixed candidate list and a shared memory.
#[derive(Debug, Clone)]
pub struct HostResolver {
    http: reqwest::Client,
    candidates: HostCandidates,
    memory: Arc<ConnectionMemory>,
    probe_timeout: Duration,
    cancel: CancellationToken,
}

impl HostResolver {
    pub fn new(
        http: reqwest::Client,
        candidates: HostCandidates,
        memory: Arc<ConnectionMemory>,
        probe_timeout: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            http,
            candidates,
            memory,
            probe_timeout,
            cancel,
        }
    }

    pub fn candidates(&self) -> &HostCandidates {
        &self.candidates
    }

    pub fn memory(&self) -> &Arc<ConnectionMemory> {
        &self.memory
    }

    /// Order in which one request should try the hosts.
    ///
    /// Probes only when nothing is remembered. If no candidate answers the
    /// probe, the plain static order is returned and the request itself will
    /// surface the failure.
    pub async fn resolve_order(&self) -> Vec<Url> {
        if let Some(remembered) = self.memory.get() {
            return order_hosts(Some(&remembered), &self.candidates);
        }

        debug!("no remembered host, probing candidates");
        let found = self.check_availability().await;
        order_hosts(found.as_ref(), &self.candidates)
    }

    /// Probe every candidate in list order and return the first reachable one.
    ///
    /// A host counts as reachable when `/api/ping` answers with any status
    /// below 500, so a backend without a ping route still qualifies. The
    /// winner is written to the connection memory.
    pub async fn check_availability(&self) -> Option<Url> {
        for host in self.candidates.iter() {
            match self.probe(host).await {
                Ok(status) if status < 500 => {
                    info!(host = %host, status, "backend found");
                    self.memory.remember(host.clone());
                    return Some(host.clone());
                }
                Ok(status) => debug!(host = %host, status, "probe answered with server error"),
                Err(Error::Cancelled) => return None,
                Err(e) => debug!(host = %host, error = %e, "backend not available"),
            }
        }

        warn!(candidates = self.candidates.len(), "no backend answered the probe");
        None
    }

    async fn probe(&self, host: &Url) -> Result<u16, Error> {
        let url = join_endpoint(host, endpoints::PING)?;
        debug!("probing {}", url);

        race(self.probe_timeout, &self.cancel, async {
            let resp = self.http.get(url).send().await?;
            Ok(resp.status().as_u16())
        })
        .await
    }
}
