// ── Core error types ──
//
// Domain errors from casa-core. Callers never see raw reqwest errors or
// the dispatcher's exhaustion wrapper: `From<casa_api::Error>` reduces a
// failed logical request to the cause that made its last host fail.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend did not answer within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Request cancelled")]
    Cancelled,

    // ── Response errors ──────────────────────────────────────────────
    #[error("Backend answered HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response from backend: {message}")]
    MalformedResponse { message: String },

    #[error("{entity_type} {identifier} not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Rejected by backend: {message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub(crate) fn rejected(message: Option<&str>, fallback: &str) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_owned();
        Self::Rejected { message }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<casa_api::Error> for CoreError {
    fn from(err: casa_api::Error) -> Self {
        use casa_api::Error as Api;

        match err {
            Api::Exhausted { last, .. } => Self::from(*last),
            Api::Transport(e) => {
                // Deadlines belong to the race, so a client-side timeout is
                // reported as a failed connection.
                let url = e.url().map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_decode() {
                    Self::malformed(e.to_string())
                } else {
                    Self::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                }
            }
            Api::Timeout { timeout } => Self::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            },
            Api::Cancelled => Self::Cancelled,
            Api::Http { status, body } => Self::Http {
                status,
                message: body,
            },
            Api::Deserialization { message, .. } => Self::MalformedResponse { message },
            Api::InvalidUrl(e) => Self::Config {
                message: format!("invalid URL: {e}"),
            },
            Api::ClientBuild(message) => Self::Config { message },
            Api::NoHosts => Self::Config {
                message: "no backend hosts configured".into(),
            },
            Api::Encode(e) => Self::Internal(format!("failed to encode request: {e}")),
        }
    }
}
