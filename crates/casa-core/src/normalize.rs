// ── Response normalization ──
//
// The backend answers list endpoints either with a bare JSON array or with
// an envelope `{ "body": [...] }` (sometimes `{ "body": { "data": [...] } }`
// for users). Everything here is pure: raw `serde_json::Value` in, domain
// records or `MalformedResponse` out.

use serde_json::Value;

use casa_api::models::truthy;
use casa_api::{RawDevice, RawUser};

use crate::error::CoreError;
use crate::model::{Device, DeviceKind, User};

/// Strip a `{ "body": ... }` envelope if one is present and truthy.
pub fn unwrap_envelope(raw: &Value) -> &Value {
    match raw.get("body") {
        Some(body) if truthy(body) => body,
        _ => raw,
    }
}

/// Normalize a device list payload.
pub fn normalize_devices(raw: &Value, kind: DeviceKind) -> Result<Vec<Device>, CoreError> {
    let payload = unwrap_envelope(raw);
    let Value::Array(items) = payload else {
        return Err(CoreError::malformed(format!(
            "expected a list of {}, got {}",
            kind.plural(),
            describe(payload)
        )));
    };
    items.iter().map(|item| device_from_item(item, kind)).collect()
}

/// Normalize a single-device payload.
///
/// Accepts an object, an envelope around one, or a one-row array (how the
/// backend returns lookups by id). An empty array means the id is unknown.
pub fn normalize_device(raw: &Value, kind: DeviceKind, id: i64) -> Result<Device, CoreError> {
    match unwrap_envelope(raw) {
        Value::Array(items) => match items.first() {
            Some(item) => device_from_item(item, kind),
            None => Err(CoreError::NotFound {
                entity_type: kind.to_string(),
                identifier: id.to_string(),
            }),
        },
        item @ Value::Object(_) => device_from_item(item, kind),
        other => Err(CoreError::malformed(format!(
            "expected a {kind}, got {}",
            describe(other)
        ))),
    }
}

/// Normalize the user list: `body` may be the array itself or wrap it in `data`.
pub fn normalize_users(raw: &Value) -> Result<Vec<User>, CoreError> {
    let mut payload = unwrap_envelope(raw);
    if let Some(data) = payload.get("data") {
        payload = data;
    }
    let Value::Array(items) = payload else {
        return Err(CoreError::malformed(format!(
            "expected a list of users, got {}",
            describe(payload)
        )));
    };
    items
        .iter()
        .map(|item| {
            serde_json::from_value::<RawUser>(item.clone())
                .map(User::from)
                .map_err(|e| CoreError::malformed(format!("bad user record: {e}")))
        })
        .collect()
}

fn device_from_item(item: &Value, kind: DeviceKind) -> Result<Device, CoreError> {
    let raw: RawDevice = serde_json::from_value(item.clone())
        .map_err(|e| CoreError::malformed(format!("bad {kind} record: {e}")))?;
    Ok(Device::from_raw(&raw, kind))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
