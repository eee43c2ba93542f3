use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::debug;
use url::Url;

/// The most recently successful backend base URL.
///
/// Shared by every request issued through one client. Concurrent writers
/// race without a lock and the last one wins; the value is only a hint for
/// attempt order, so a stale entry costs one failed attempt at most.
#[derive(Debug, Default)]
pub struct ConnectionMemory {
    last_successful: ArcSwapOption<Url>,
}

impl ConnectionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A memory that already points at `host`.
    pub fn remembering(host: Url) -> Self {
        let memory = Self::new();
        memory.remember(host);
        memory
    }

    pub fn get(&self) -> Option<Url> {
        self.last_successful.load_full().map(|url| (*url).clone())
    }

    pub fn remember(&self, host: Url) {
        debug!(host = %host, "remembering backend host");
        self.last_successful.store(Some(Arc::new(host)));
    }

    pub fn clear(&self) {
        debug!("clearing remembered backend host");
        self.last_successful.store(None);
    }
}
