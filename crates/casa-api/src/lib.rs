//! Async client for the casa home-automation backend.
//!
//! The backend may live at any of several base URLs (a configured primary
//! plus LAN fallbacks). This crate hides that behind one client:
//!
//! - **[`HostCandidates`]**: the ordered base-URL list.
//! - **[`ConnectionMemory`]**: the last host that answered, shared and
//!   injectable.
//! - **[`HostResolver`]**: attempt order, plus a `/api/ping` probe when
//!   nothing is remembered.
//! - **[`race`]**: one attempt against a deadline and a cancellation token.
//! - **[`Dispatcher`]**: one logical request, linear fallback across hosts.
//! - **[`CasaClient`]**: typed endpoint methods.

pub mod client;
pub mod dispatcher;
pub mod endpoints;
pub mod error;
pub mod hosts;
pub mod memory;
pub mod models;
pub mod race;
pub mod resolver;
pub mod transport;

pub use client::CasaClient;
pub use dispatcher::{Dispatcher, Method, RequestEnvelope};
pub use error::Error;
pub use hosts::{HostCandidates, order_hosts};
pub use memory::ConnectionMemory;
pub use models::{ApiReply, RawDevice, RawUser};
pub use race::race;
pub use resolver::HostResolver;
pub use transport::TransportConfig;
