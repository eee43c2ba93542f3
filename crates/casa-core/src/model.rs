// ── Domain model ──
//
// Canonical device and user records. The backend's numeric `status`
// columns mean different things per device kind; the mapping lives here
// and nowhere else.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use casa_api::{RawDevice, RawUser};

/// Account status sent on registration when none is given.
pub const DEFAULT_ACCOUNT_STATUS: &str = "activo";

/// The two device families the backend exposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Door,
}

impl DeviceKind {
    /// Boolean state for a backend status code.
    ///
    /// Light: `1` is on, anything else off. Door: `0` is closed, anything
    /// else open.
    pub fn state_from_status(self, status: i64) -> bool {
        match self {
            Self::Light => status == 1,
            Self::Door => status == 0,
        }
    }

    /// Backend status code for a boolean state. Inverse of
    /// [`state_from_status`](Self::state_from_status) on `{0, 1}`.
    pub fn status_for_state(self, state: bool) -> u8 {
        match self {
            Self::Light => u8::from(state),
            Self::Door => u8::from(!state),
        }
    }

    /// Human label for a state: `on`/`off` or `closed`/`open`.
    pub fn state_label(self, state: bool) -> &'static str {
        match (self, state) {
            (Self::Light, true) => "on",
            (Self::Light, false) => "off",
            (Self::Door, true) => "closed",
            (Self::Door, false) => "open",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::Light => "lights",
            Self::Door => "doors",
        }
    }
}

/// A light or a door, normalized.
///
/// `state` is *on* for lights and *closed* for doors. A locked door is a
/// closed door; the backend has no separate lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    pub display_name: String,
    pub state: bool,
    pub kind: DeviceKind,
}

impl Device {
    /// A status that is not an integer matches neither `1` nor `0`, so it
    /// reads as off for lights and open for doors.
    pub fn from_raw(raw: &RawDevice, kind: DeviceKind) -> Self {
        Self {
            id: raw.id,
            display_name: raw.location(),
            state: raw
                .status_code()
                .is_some_and(|status| kind.state_from_status(status)),
            kind,
        }
    }

    pub fn is_on(&self) -> bool {
        self.kind == DeviceKind::Light && self.state
    }

    pub fn is_closed(&self) -> bool {
        self.kind == DeviceKind::Door && self.state
    }

    pub fn is_locked(&self) -> bool {
        self.is_closed()
    }

    pub fn state_label(&self) -> &'static str {
        self.kind.state_label(self.state)
    }

    pub fn status_code(&self) -> u8 {
        self.kind.status_for_state(self.state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub status: Option<String>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(DEFAULT_ACCOUNT_STATUS))
    }
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        Self {
            id: raw.id,
            name: raw.nombre,
            email: raw.email,
            status: raw.status,
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub email: String,
}

/// Registration form.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub status: Option<String>,
}
