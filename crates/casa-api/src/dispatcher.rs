// ── Request dispatch ──
//
// One logical request, many possible hosts. The resolver supplies the order,
// each host gets exactly one deadline-bound attempt, and the first success
// wins and is remembered. Hosts are tried one after another, never in
// parallel, so the worst case is `hosts × request_timeout`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, body_preview};
use crate::hosts::{HostCandidates, join_endpoint};
use crate::memory::ConnectionMemory;
use crate::race::race;
use crate::resolver::HostResolver;
use crate::transport::TransportConfig;

/// HTTP methods the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A request as handed to the dispatcher: path, method and optional body.
///
/// Paths are relative to whichever host ends up serving the request.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    path: String,
    method: Method,
    body: Option<Value>,
}

impl RequestEnvelope {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::Get,
            body: None,
        }
    }

    /// A POST carrying `body` serialized as JSON.
    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self, Error> {
        let body = serde_json::to_value(body).map_err(Error::Encode)?;
        Ok(Self {
            path: path.into(),
            method: Method::Post,
            body: Some(body),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Sends requests through the ordered host list with linear fallback.
#[derive(Debug)]
pub struct Dispatcher {
    http: reqwest::Client,
    resolver: HostResolver,
    request_timeout: Duration,
    cancel: CancellationToken,
}

impl Dispatcher {
    /// Create a dispatcher with a client built from `transport`.
    pub fn new(
        candidates: HostCandidates,
        memory: Arc<ConnectionMemory>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, candidates, memory, transport))
    }

    /// Create a dispatcher around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        candidates: HostCandidates,
        memory: Arc<ConnectionMemory>,
        transport: &TransportConfig,
    ) -> Self {
        let cancel = CancellationToken::new();
        let resolver = HostResolver::new(
            http.clone(),
            candidates,
            memory,
            transport.probe_timeout,
            cancel.clone(),
        );
        Self {
            http,
            resolver,
            request_timeout: transport.request_timeout,
            cancel,
        }
    }

    pub fn resolver(&self) -> &HostResolver {
        &self.resolver
    }

    pub fn memory(&self) -> &Arc<ConnectionMemory> {
        self.resolver.memory()
    }

    /// Abort every outstanding and future attempt with [`Error::Cancelled`].
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Send `request`, trying hosts in resolver order until one succeeds.
    ///
    /// Success means a 2xx status and a JSON body; the serving host becomes
    /// the remembered one. Every other outcome moves on to the next host.
    /// When all hosts fail the result is [`Error::Exhausted`] carrying the
    /// last failure.
    pub async fn dispatch(&self, request: &RequestEnvelope) -> Result<Value, Error> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let order = self.resolver.resolve_order().await;
        let attempts = order.len();
        debug!(
            method = %request.method(),
            path = request.path(),
            hosts = attempts,
            "dispatching request"
        );

        let mut last_error = None;
        for (index, host) in order.iter().enumerate() {
            debug!(host = %host, attempt = index + 1, of = attempts, "attempting host");

            match race(self.request_timeout, &self.cancel, self.attempt(host, request)).await {
                Ok(payload) => {
                    info!(host = %host, path = request.path(), "request succeeded");
                    self.memory().remember(host.clone());
                    return Ok(payload);
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => {
                    warn!(host = %host, error = %e, "attempt failed");
                    last_error = Some(e);
                }
            }
        }

        let last = last_error.ok_or(Error::NoHosts)?;
        warn!(attempts, path = request.path(), "all backend hosts failed");
        Err(Error::Exhausted {
            attempts,
            last: Box::new(last),
        })
    }

    /// One exchange with one host. Not deadline-bound by itself.
    async fn attempt(&self, host: &Url, request: &RequestEnvelope) -> Result<Value, Error> {
        let url = join_endpoint(host, request.path())?;
        debug!("{} {}", request.method(), url);

        let mut builder = match request.method() {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body: body_preview(&body),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", body_preview(&body)),
            body,
        })
    }
}
