// ── Error classification ──
//
// Turns a `CoreError` into a category plus an advisory a person can act
// on. Rendering is the caller's job; this module only produces text.

use serde::Serialize;
use strum::AsRefStr;

use crate::error::CoreError;

/// Broad failure buckets, stable enough to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "snake_case", tag = "kind", content = "status")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    NetworkUnreachable,
    Timeout,
    HttpError(u16),
    MalformedResponse,
    Rejected,
    Cancelled,
    Unknown,
}

/// A classified failure, ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    /// What was being attempted, e.g. `"list lights"`.
    pub operation: String,
    pub title: String,
    pub message: String,
    /// The underlying error, as text.
    pub cause: String,
}

const NETWORK_HINTS: &str = "Check that:\n\
    1. the casa backend is running\n\
    2. this machine is on the same network as the backend\n\
    3. no firewall is blocking the port\n\n\
    From an Android emulator the host machine is 10.0.2.2, not localhost.\n\
    Find the backend's address with `ipconfig` (Windows) or `ifconfig` (macOS/Linux).";

const NOT_FOUND_HINTS: &str = "The requested endpoint does not exist on the backend (HTTP 404).\n\n\
    Possible reasons:\n\
    1. the endpoint is not implemented by this backend version\n\
    2. the route is misconfigured\n\
    3. the HTTP method does not match (GET vs POST)";

const TIMEOUT_HINTS: &str = "The backend took too long to answer.\n\n\
    Try:\n\
    1. restarting the backend\n\
    2. checking the backend console for errors\n\
    3. pointing --api-url at a different address";

/// Classify a failed `operation`.
pub fn classify(operation: &str, err: &CoreError) -> ClassifiedError {
    let cause = err.to_string();
    let (category, title, message) = match err {
        CoreError::ConnectionFailed { .. } => (
            ErrorCategory::NetworkUnreachable,
            "Connection error",
            format!("Could not connect to the backend. {NETWORK_HINTS}"),
        ),
        CoreError::Timeout { .. } => (
            ErrorCategory::Timeout,
            "Connection error",
            TIMEOUT_HINTS.to_owned(),
        ),
        CoreError::Http { status: 404, .. } => (
            ErrorCategory::HttpError(404),
            "Server error",
            NOT_FOUND_HINTS.to_owned(),
        ),
        CoreError::Http { status, .. } => (
            ErrorCategory::HttpError(*status),
            "Server error",
            format!("{cause}\n\nCheck the backend logs for details."),
        ),
        CoreError::MalformedResponse { .. } => (
            ErrorCategory::MalformedResponse,
            "Unexpected response",
            "The backend answered in an unexpected format. \
             Check that it sends valid JSON."
                .to_owned(),
        ),
        CoreError::Rejected { message } | CoreError::ValidationFailed { message } => (
            ErrorCategory::Rejected,
            "Request refused",
            message.clone(),
        ),
        CoreError::Cancelled => (
            ErrorCategory::Cancelled,
            "Cancelled",
            "The request was cancelled before it finished.".to_owned(),
        ),
        CoreError::NotFound { .. } | CoreError::Config { .. } | CoreError::Internal(_) => (
            ErrorCategory::Unknown,
            "Error",
            cause.clone(),
        ),
    };

    ClassifiedError {
        category,
        operation: operation.to_owned(),
        title: title.to_owned(),
        message,
        cause,
    }
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.operation, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_gets_network_hints() {
        let err = CoreError::ConnectionFailed {
            url: "http://10.0.2.2:4000/api/luces".into(),
            reason: "connection refused".into(),
        };
        let classified = classify("list lights", &err);
        assert_eq!(classified.category, ErrorCategory::NetworkUnreachable);
        assert!(classified.message.contains("10.0.2.2"));
        assert!(classified.cause.contains("connection refused"));
    }

    #[test]
    fn not_found_is_its_own_advisory() {
        let err = CoreError::Http {
            status: 404,
            message: "Cannot GET /api/puertas".into(),
        };
        let classified = classify("list doors", &err);
        assert_eq!(classified.category, ErrorCategory::HttpError(404));
        assert!(classified.message.contains("does not exist"));
    }

    #[test]
    fn other_statuses_keep_the_cause() {
        let err = CoreError::Http {
            status: 500,
            message: "boom".into(),
        };
        let classified = classify("toggle light", &err);
        assert_eq!(classified.category, ErrorCategory::HttpError(500));
        assert!(classified.message.starts_with("Backend answered HTTP 500: boom"));
        assert_eq!(classified.category.as_ref(), "http_error");
    }

    #[test]
    fn rejection_shows_backend_message() {
        let err = CoreError::Rejected {
            message: "bad creds".into(),
        };
        let classified = classify("login", &err);
        assert_eq!(classified.category, ErrorCategory::Rejected);
        assert_eq!(classified.message, "bad creds");
    }

    #[test]
    fn everything_else_is_unknown() {
        let classified = classify("x", &CoreError::Internal("oops".into()));
        assert_eq!(classified.category, ErrorCategory::Unknown);
        assert_eq!(classified.message, "Internal error: oops");
    }
}
