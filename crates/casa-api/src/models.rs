// Wire types for the casa backend.
//
// Request bodies use the backend's own field names (`pw`, `nombre`, ...).
// Replies are kept loose: the backend answers in several shapes and
// `casa-core` decides what each one means.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub pw: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub nombre: &'a str,
    pub email: &'a str,
    pub pw: &'a str,
    pub status: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserRequest {
    pub id: i64,
}

/// Body for `/api/luces/estado/:id` and `/api/puertas/estado/:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateUpdate {
    pub status: u8,
}

/// A light or door row as the backend stores it.
///
/// Only `id` is typed strictly. `ubicacion` may be null and `status` may
/// come back as any JSON value; the domain layer decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawDevice {
    pub id: i64,
    #[serde(default)]
    pub ubicacion: Value,
    pub status: Value,
}

impl RawDevice {
    /// Location as text. Null or missing becomes empty, other scalars are
    /// rendered as JSON.
    pub fn location(&self) -> String {
        match &self.ubicacion {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// The status column when it is an integer.
    pub fn status_code(&self) -> Option<i64> {
        self.status.as_i64()
    }
}

/// A user row as the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawUser {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Generic command reply: `{status, mensaje, error, body, ...}`.
///
/// Every field is optional and loosely typed. Use the accessors, which apply
/// the backend's truthiness conventions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub mensaje: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiReply {
    /// Interpret any JSON payload as a reply. Non-objects become the `body`.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                serde_json::from_value(Value::Object(map.clone())).unwrap_or_else(|_| Self {
                    extra: map,
                    ..Self::default()
                })
            }
            other => Self {
                body: Some(other),
                ..Self::default()
            },
        }
    }

    /// `status` is present and truthy.
    pub fn is_ok(&self) -> bool {
        self.status.as_ref().is_some_and(truthy)
    }

    /// `status` is literally `false`.
    pub fn is_rejected(&self) -> bool {
        matches!(self.status, Some(Value::Bool(false)))
    }

    /// `error` is present and truthy.
    pub fn has_error(&self) -> bool {
        self.error.as_ref().is_some_and(truthy)
    }

    /// The backend's human-readable message, if it sent one as text.
    pub fn message(&self) -> Option<&str> {
        self.mensaje.as_ref().and_then(Value::as_str)
    }
}

/// JavaScript-style truthiness, which is what the backend's clients assume.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
