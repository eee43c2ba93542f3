//! CLI error types with miette diagnostics.
//!
//! Backend failures go through `casa_core::classify` so the help text is
//! the same advisory a person would get from any casa client.

use miette::Diagnostic;
use thiserror::Error;

use casa_config::ConfigError;
use casa_core::{ClassifiedError, CoreError, ErrorCategory, classify};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Backend ──────────────────────────────────────────────────────
    #[error("{title}: could not {operation}")]
    #[diagnostic(code(casa::unreachable), help("{advice}"))]
    Unreachable {
        title: String,
        operation: String,
        advice: String,
        #[source]
        source: CoreError,
    },

    #[error("{title}: {operation} timed out")]
    #[diagnostic(code(casa::timeout), help("{advice}"))]
    Timeout {
        title: String,
        operation: String,
        advice: String,
        #[source]
        source: CoreError,
    },

    #[error("{title}: {operation} failed with HTTP {status}")]
    #[diagnostic(code(casa::http), help("{advice}"))]
    Http {
        title: String,
        operation: String,
        status: u16,
        advice: String,
        #[source]
        source: CoreError,
    },

    #[error("{title}: {operation} got a response it could not read")]
    #[diagnostic(code(casa::malformed_response), help("{advice}"))]
    Malformed {
        title: String,
        operation: String,
        advice: String,
        #[source]
        source: CoreError,
    },

    #[error("{operation} refused: {message}")]
    #[diagnostic(code(casa::rejected))]
    Rejected { operation: String, message: String },

    #[error("{operation} cancelled")]
    #[diagnostic(code(casa::cancelled))]
    Cancelled { operation: String },

    #[error("{resource_type} {identifier} not found")]
    #[diagnostic(
        code(casa::not_found),
        help("Run: casa {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{operation} failed: {message}")]
    #[diagnostic(code(casa::backend))]
    Backend { operation: String, message: String },

    #[error("No casa backend answered")]
    #[diagnostic(
        code(casa::no_backend),
        help(
            "Tried: {tried}\n\
             Start the backend, or point at it with --api-url http://<host>:4000"
        )
    )]
    NoBackend { tried: String },

    #[error("{failed} of {total} sections could not be loaded")]
    #[diagnostic(code(casa::incomplete))]
    Incomplete { failed: usize, total: usize },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(casa::validation))]
    Validation { field: String, reason: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(casa::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists")]
    #[diagnostic(
        code(casa::config_exists),
        help("Pass --force to overwrite {path}")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(casa::config))]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unreachable { .. } | Self::NoBackend { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Rejected { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Cancelled { .. } => exit_code::INTERRUPTED,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Build from a failed backend `operation`, using its classified advisory.
    pub fn backend(operation: &str, err: CoreError) -> Self {
        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                return Self::NotFound {
                    list_command: format!("{entity_type}s list"),
                    resource_type: entity_type,
                    identifier,
                };
            }
            CoreError::ValidationFailed { message } => {
                return Self::Validation {
                    field: "input".into(),
                    reason: message,
                };
            }
            _ => {}
        }

        let ClassifiedError {
            category,
            operation,
            title,
            message,
            cause,
        } = classify(operation, &err);

        match category {
            ErrorCategory::NetworkUnreachable => Self::Unreachable {
                title,
                operation,
                advice: message,
                source: err,
            },
            ErrorCategory::Timeout => Self::Timeout {
                title,
                operation,
                advice: message,
                source: err,
            },
            ErrorCategory::HttpError(status) => Self::Http {
                title,
                operation,
                status,
                advice: message,
                source: err,
            },
            ErrorCategory::MalformedResponse => Self::Malformed {
                title,
                operation,
                advice: message,
                source: err,
            },
            ErrorCategory::Rejected => Self::Rejected { operation, message },
            ErrorCategory::Cancelled => Self::Cancelled { operation },
            ErrorCategory::Unknown => Self::Backend {
                operation,
                message: cause,
            },
        }
    }
}

/// Attach the operation name to a core result.
pub trait During<T> {
    fn during(self, operation: &str) -> Result<T, CliError>;
}

impl<T> During<T> for Result<T, CoreError> {
    fn during(self, operation: &str) -> Result<T, CliError> {
        self.map_err(|err| CliError::backend(operation, err))
    }
}
