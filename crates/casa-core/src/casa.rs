// ── Casa facade ──
//
// The entry point for consumers. Wraps the multi-host `CasaClient`,
// validates input, decodes replies into domain records, and reduces every
// failure to a `CoreError`.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use casa_api::{ApiReply, CasaClient, ConnectionMemory};

use crate::config::CasaConfig;
use crate::error::CoreError;
use crate::model::{DEFAULT_ACCOUNT_STATUS, Device, DeviceKind, NewAccount, Session, User};
use crate::normalize::{normalize_device, normalize_devices, normalize_users};

/// Snapshot of where requests are going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    /// Candidate base URLs, primary first.
    pub candidates: Vec<Url>,
    /// The host that answered last, if any.
    pub remembered: Option<Url>,
}

/// Handle to one casa backend.
///
/// Cheaply cloneable via `Arc<CasaInner>`; clones share the connection
/// memory and the HTTP pool.
#[derive(Clone)]
pub struct Casa {
    inner: Arc<CasaInner>,
}

struct CasaInner {
    client: CasaClient,
}

impl Casa {
    /// Build a handle with a fresh connection memory.
    pub fn new(config: CasaConfig) -> Result<Self, CoreError> {
        Self::with_memory(config, Arc::new(ConnectionMemory::new()))
    }

    /// Build a handle that shares `memory` with other handles.
    pub fn with_memory(config: CasaConfig, memory: Arc<ConnectionMemory>) -> Result<Self, CoreError> {
        let client = CasaClient::new(config.candidates(), memory, &config.transport())?;
        Ok(Self {
            inner: Arc::new(CasaInner { client }),
        })
    }

    pub fn memory(&self) -> &Arc<ConnectionMemory> {
        self.inner.client.memory()
    }

    /// Abort every in-flight request on this handle and its clones.
    pub fn shutdown(&self) {
        self.inner.client.shutdown();
    }

    // ── Connectivity ─────────────────────────────────────────────────

    pub async fn check_availability(&self) -> Option<Url> {
        self.inner.client.check_availability().await
    }

    /// Forget the remembered host and probe all candidates again.
    pub async fn reset_connection(&self) -> Option<Url> {
        info!("resetting connection memory");
        self.inner.client.reset_connection().await
    }

    pub fn connection_report(&self) -> ConnectionReport {
        ConnectionReport {
            candidates: self.inner.client.candidates().iter().cloned().collect(),
            remembered: self.memory().get(),
        }
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Authenticate. Succeeds only when the backend answers with a truthy
    /// `status`.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Session, CoreError> {
        let email = email.trim();
        require("email", email)?;
        require("password", password.expose_secret())?;

        let reply = self.inner.client.login(email, password).await?;
        if reply.is_ok() {
            info!(email, "login accepted");
            Ok(Session {
                email: email.to_owned(),
            })
        } else {
            warn!(email, "login refused");
            Err(CoreError::rejected(reply.message(), "Invalid credentials"))
        }
    }

    pub async fn register(&self, account: &NewAccount) -> Result<(), CoreError> {
        let name = account.name.trim();
        let email = account.email.trim();
        require("name", name)?;
        require("email", email)?;
        require("password", account.password.expose_secret())?;
        let status = account.status.as_deref().unwrap_or(DEFAULT_ACCOUNT_STATUS);

        let reply = self
            .inner
            .client
            .register(name, email, &account.password, status)
            .await?;
        if reply.is_ok() {
            info!(email, "account registered");
            Ok(())
        } else {
            Err(CoreError::rejected(reply.message(), "Registration failed"))
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let raw = self.inner.client.list_users().await?;
        normalize_users(&raw)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), CoreError> {
        let reply = self.inner.client.delete_user(id).await?;
        if reply.has_error() {
            return Err(CoreError::rejected(reply.message(), "Could not delete user"));
        }
        info!(id, "user deleted");
        Ok(())
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(&self, kind: DeviceKind) -> Result<Vec<Device>, CoreError> {
        let raw = match kind {
            DeviceKind::Light => self.inner.client.list_lights().await?,
            DeviceKind::Door => self.inner.client.list_doors().await?,
        };
        let devices = normalize_devices(&raw, kind)?;
        debug!(%kind, count = devices.len(), "devices loaded");
        Ok(devices)
    }

    pub async fn get_device(&self, kind: DeviceKind, id: i64) -> Result<Device, CoreError> {
        let raw = match kind {
            DeviceKind::Light => self.inner.client.get_light(id).await?,
            DeviceKind::Door => self.inner.client.get_door(id).await?,
        };
        normalize_device(&raw, kind, id)
    }

    pub async fn lights_at(&self, location: &str) -> Result<Vec<Device>, CoreError> {
        require("location", location.trim())?;
        let raw = self.inner.client.lights_at(location.trim()).await?;
        normalize_devices(&raw, DeviceKind::Light)
    }

    pub async fn doors_of_type(&self, door_type: &str) -> Result<Vec<Device>, CoreError> {
        require("door type", door_type.trim())?;
        let raw = self.inner.client.doors_of_type(door_type.trim()).await?;
        normalize_devices(&raw, DeviceKind::Door)
    }

    /// Request a new state: on/off for lights, closed/open for doors.
    pub async fn set_device_state(
        &self,
        kind: DeviceKind,
        id: i64,
        state: bool,
    ) -> Result<(), CoreError> {
        let status = kind.status_for_state(state);
        let reply = match kind {
            DeviceKind::Light => self.inner.client.set_light_status(id, status).await?,
            DeviceKind::Door => self.inner.client.set_door_status(id, status).await?,
        };
        check_command(&reply)?;
        info!(%kind, id, state = kind.state_label(state), "state updated");
        Ok(())
    }

    /// Lock a door (close it).
    pub async fn lock_door(&self, id: i64) -> Result<(), CoreError> {
        self.set_device_state(DeviceKind::Door, id, true).await
    }

    /// Unlock a door (open it).
    pub async fn unlock_door(&self, id: i64) -> Result<(), CoreError> {
        self.set_device_state(DeviceKind::Door, id, false).await
    }

    /// Fetch lights and doors concurrently.
    pub async fn overview(&self) -> (Result<Vec<Device>, CoreError>, Result<Vec<Device>, CoreError>) {
        tokio::join!(
            self.list_devices(DeviceKind::Light),
            self.list_devices(DeviceKind::Door)
        )
    }
}

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::ValidationFailed {
            message: format!("{field} must not be empty"),
        });
    }
    Ok(())
}

// State commands answer `{status: false, mensaje}` or `{error: true, ...}`
// when refused; anything else counts as accepted.
fn check_command(reply: &ApiReply) -> Result<(), CoreError> {
    if reply.is_rejected() || reply.has_error() {
        return Err(CoreError::rejected(reply.message(), "Command refused"));
    }
    Ok(())
}
