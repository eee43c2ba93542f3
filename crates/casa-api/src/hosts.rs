// ── Host candidates ──
//
// The ordered list of backend base URLs a request may be routed to:
// the configured primary first, then fallbacks. Fixed for the lifetime
// of a client.

use url::Url;

use crate::error::Error;

/// Primary base URL used when nothing is configured.
pub const DEFAULT_PRIMARY: &str = "http://localhost:4000";

/// Fallback addresses for common local setups: the Android emulator host
/// alias, loopback, and typical home-router LAN addresses.
pub const DEFAULT_FALLBACKS: &[&str] = &[
    "http://10.0.2.2:4000",
    "http://127.0.0.1:4000",
    "http://localhost:4000",
    "http://192.168.0.1:4000",
    "http://192.168.1.1:4000",
    "http://192.168.0.8:4000",
    "http://192.168.1.10:4000",
    "http://192.168.0.100:4000",
    "http://192.168.1.100:4000",
    "http://192.168.0.254:4000",
    "http://192.168.1.254:4000",
];

/// Ordered, never-empty list of base URLs.
///
/// Duplicates are tolerated; [`order_hosts`] lists each distinct host once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCandidates {
    hosts: Vec<Url>,
}

impl HostCandidates {
    /// A primary URL followed by explicit fallbacks.
    pub fn new(primary: Url, fallbacks: impl IntoIterator<Item = Url>) -> Self {
        let mut hosts = vec![primary];
        hosts.extend(fallbacks);
        Self { hosts }
    }

    /// A primary URL with no fallbacks.
    pub fn single(primary: Url) -> Self {
        Self::new(primary, [])
    }

    /// A primary URL followed by [`DEFAULT_FALLBACKS`].
    pub fn with_default_fallbacks(primary: Url) -> Self {
        Self::new(primary, default_fallbacks())
    }

    /// The configured primary URL.
    pub fn primary(&self) -> &Url {
        // `new` always pushes the primary first.
        &self.hosts[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Url> {
        self.hosts.iter()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn contains(&self, host: &Url) -> bool {
        self.hosts.iter().any(|h| same_host(h, host))
    }
}

/// Parse [`DEFAULT_FALLBACKS`].
pub fn default_fallbacks() -> Vec<Url> {
    DEFAULT_FALLBACKS
        .iter()
        .filter_map(|raw| Url::parse(raw).ok())
        .collect()
}

/// Parse a base URL, rejecting anything that is not http(s).
pub fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithoutBase)),
    }
}

/// Full URL for an endpoint path on a base URL: `{base}{path}`.
///
/// A trailing `/` on the base and a missing leading `/` on the path are both
/// tolerated, so a base with a path prefix (`http://nas/casa`) keeps it.
pub fn join_endpoint(base: &Url, path: &str) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// Base URLs compare equal regardless of a trailing slash.
pub(crate) fn same_host(a: &Url, b: &Url) -> bool {
    a.as_str().trim_end_matches('/') == b.as_str().trim_end_matches('/')
}

/// Attempt order for one request.
///
/// The remembered host (if any) comes first, then every candidate in list
/// order. Each distinct host appears exactly once.
pub fn order_hosts(memory: Option<&Url>, candidates: &HostCandidates) -> Vec<Url> {
    let mut order: Vec<Url> = Vec::with_capacity(candidates.len() + 1);
    for host in memory.into_iter().chain(candidates.iter()) {
        if !order.iter().any(|seen| same_host(seen, host)) {
            order.push(host.clone());
        }
    }
    order
}
