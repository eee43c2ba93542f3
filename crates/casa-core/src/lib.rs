//! Domain layer for the casa home-automation backend.
//!
//! Sits on top of `casa-api` and speaks in lights, doors, and users
//! instead of JSON payloads:
//!
//! - **[`Casa`]**: the facade. Every operation goes through the
//!   multi-host dispatcher and comes back as a domain record or a
//!   [`CoreError`].
//! - **[`normalize`]**: raw payloads to [`Device`] and [`User`] records.
//! - **[`classify`]**: a [`CoreError`] to an actionable advisory.
//! - **[`DeviceBoard`]**: optimistic state changes with rollback.

pub mod advisory;
pub mod board;
pub mod casa;
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;

pub use advisory::{AdvisoryGate, AdvisoryGuard};
pub use board::DeviceBoard;
pub use casa::{Casa, ConnectionReport};
pub use classify::{ClassifiedError, ErrorCategory, classify};
pub use config::CasaConfig;
pub use error::CoreError;
pub use model::{DEFAULT_ACCOUNT_STATUS, Device, DeviceKind, NewAccount, Session, User};

pub use casa_api::{ConnectionMemory, endpoints};
