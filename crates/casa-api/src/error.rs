use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `casa-api` crate.
///
/// Every variant is a structured failure kind produced by the HTTP layer
/// itself, so callers never have to infer the kind from message text.
/// `casa-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, reset, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The attempt did not settle before its deadline.
    #[error("Request timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    /// The owner cancelled all outstanding attempts.
    #[error("Request cancelled")]
    Cancelled,

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Response ────────────────────────────────────────────────────
    /// Non-2xx status, with a preview of the response body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not JSON, or not the JSON shape the caller asked for.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(serde_json::Error),

    // ── Fallback ────────────────────────────────────────────────────
    /// The candidate list produced no host to try.
    #[error("No backend hosts configured")]
    NoHosts,

    /// Every candidate host failed. `last` is the error from the final attempt.
    #[error("All {attempts} backend hosts failed; last error: {last}")]
    Exhausted { attempts: usize, last: Box<Error> },
}

impl Error {
    /// The error that actually ended the request.
    ///
    /// For [`Exhausted`](Self::Exhausted) this is the last per-host failure;
    /// every other variant is its own cause.
    pub fn primary_cause(&self) -> &Self {
        match self {
            Self::Exhausted { last, .. } => last.primary_cause(),
            other => other,
        }
    }

    /// HTTP status code, if the failure came from a status response.
    pub fn status(&self) -> Option<u16> {
        match self.primary_cause() {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Trim a response body down to something fit for an error message.
pub(crate) fn body_preview(body: &str) -> String {
    const PREVIEW_CHARS: usize = 200;
    body.chars().take(PREVIEW_CHARS).collect()
}
