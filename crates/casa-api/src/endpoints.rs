//! Backend endpoint paths.

/// Reachability probe.
pub const PING: &str = "/api/ping";

pub const LOGIN: &str = "/api/usuario/login";
pub const REGISTER: &str = "/api/usuario/agregar";
pub const USERS: &str = "/api/usuario";
pub const DELETE_USER: &str = "/api/usuario/eliminar";

pub const LIGHTS: &str = "/api/luces";
pub const DOORS: &str = "/api/puertas";

pub fn light(id: i64) -> String {
    format!("{LIGHTS}/{id}")
}

pub fn light_state(id: i64) -> String {
    format!("{LIGHTS}/estado/{id}")
}

pub fn lights_at(location: &str) -> String {
    format!("{LIGHTS}/ubicacion/{}", encode_segment(location))
}

pub fn door(id: i64) -> String {
    format!("{DOORS}/{id}")
}

pub fn door_state(id: i64) -> String {
    format!("{DOORS}/estado/{id}")
}

pub fn doors_of_type(kind: &str) -> String {
    format!("{DOORS}/tipo/{}", encode_segment(kind))
}

/// Percent-encode a free-text path segment.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
