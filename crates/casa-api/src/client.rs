// casa backend HTTP client
//
// Typed endpoint methods on top of the dispatcher. List and read endpoints
// hand back the raw JSON payload (the backend wraps it in several ways);
// command endpoints hand back an `ApiReply`.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::dispatcher::{Dispatcher, RequestEnvelope};
use crate::endpoints;
use crate::error::Error;
use crate::hosts::HostCandidates;
use crate::memory::ConnectionMemory;
use crate::models::{ApiReply, DeleteUserRequest, LoginRequest, RegisterRequest, StateUpdate};
use crate::transport::TransportConfig;

/// Client for the casa home-automation backend.
///
/// Every call goes through the multi-host [`Dispatcher`], so it may be
/// served by the primary URL or by any fallback.
#[derive(Debug)]
pub struct CasaClient {
    dispatcher: Dispatcher,
}

impl CasaClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(
        candidates: HostCandidates,
        memory: Arc<ConnectionMemory>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            dispatcher: Dispatcher::new(candidates, memory, transport)?,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        candidates: HostCandidates,
        memory: Arc<ConnectionMemory>,
        transport: &TransportConfig,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::with_client(http, candidates, memory, transport),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn candidates(&self) -> &HostCandidates {
        self.dispatcher.resolver().candidates()
    }

    pub fn memory(&self) -> &Arc<ConnectionMemory> {
        self.dispatcher.memory()
    }

    /// Abort all in-flight requests.
    pub fn shutdown(&self) {
        self.dispatcher.shutdown();
    }

    // ── Connectivity ─────────────────────────────────────────────────

    /// Probe the candidates and return the first reachable base URL.
    pub async fn check_availability(&self) -> Option<Url> {
        self.dispatcher.resolver().check_availability().await
    }

    /// Forget the remembered host, then probe again.
    pub async fn reset_connection(&self) -> Option<Url> {
        self.memory().clear();
        self.check_availability().await
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &SecretString) -> Result<ApiReply, Error> {
        debug!(email, "logging in");
        let body = LoginRequest {
            email,
            pw: password.expose_secret(),
        };
        self.command(RequestEnvelope::post(endpoints::LOGIN, &body)?)
            .await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
        status: &str,
    ) -> Result<ApiReply, Error> {
        debug!(email, "registering user");
        let body = RegisterRequest {
            nombre: name,
            email,
            pw: password.expose_secret(),
            status,
        };
        self.command(RequestEnvelope::post(endpoints::REGISTER, &body)?)
            .await
    }

    pub async fn list_users(&self) -> Result<Value, Error> {
        self.read(endpoints::USERS).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<ApiReply, Error> {
        let body = DeleteUserRequest { id };
        self.command(RequestEnvelope::post(endpoints::DELETE_USER, &body)?)
            .await
    }

    // ── Lights ───────────────────────────────────────────────────────

    pub async fn list_lights(&self) -> Result<Value, Error> {
        self.read(endpoints::LIGHTS).await
    }

    pub async fn get_light(&self, id: i64) -> Result<Value, Error> {
        self.read(&endpoints::light(id)).await
    }

    pub async fn lights_at(&self, location: &str) -> Result<Value, Error> {
        self.read(&endpoints::lights_at(location)).await
    }

    /// Switch a light: `1` = on, `0` = off.
    pub async fn set_light_status(&self, id: i64, status: u8) -> Result<ApiReply, Error> {
        debug!(id, status, "updating light");
        let body = StateUpdate { status };
        self.command(RequestEnvelope::post(endpoints::light_state(id), &body)?)
            .await
    }

    // ── Doors ────────────────────────────────────────────────────────

    pub async fn list_doors(&self) -> Result<Value, Error> {
        self.read(endpoints::DOORS).await
    }

    pub async fn get_door(&self, id: i64) -> Result<Value, Error> {
        self.read(&endpoints::door(id)).await
    }

    pub async fn doors_of_type(&self, kind: &str) -> Result<Value, Error> {
        self.read(&endpoints::doors_of_type(kind)).await
    }

    /// Move a door: `0` = closed, `1` = open.
    pub async fn set_door_status(&self, id: i64, status: u8) -> Result<ApiReply, Error> {
        debug!(id, status, "updating door");
        let body = StateUpdate { status };
        self.command(RequestEnvelope::post(endpoints::door_state(id), &body)?)
            .await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn read(&self, path: &str) -> Result<Value, Error> {
        self.dispatcher.dispatch(&RequestEnvelope::get(path)).await
    }

    async fn command(&self, request: RequestEnvelope) -> Result<ApiReply, Error> {
        let payload = self.dispatcher.dispatch(&request).await?;
        Ok(ApiReply::from_value(payload))
    }
}
