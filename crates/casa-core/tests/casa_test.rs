#![allow(clippy::unwrap_used)]
// Integration tests for the `Casa` facade using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use casa_core::{
    AdvisoryGate, Casa, CasaConfig, CoreError, DeviceBoard, DeviceKind, ErrorCategory, NewAccount,
    classify,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn casa_for(server: &MockServer) -> Casa {
    let config = CasaConfig {
        request_timeout: Duration::from_secs(2),
        probe_timeout: Duration::from_millis(500),
        ..CasaConfig::new(server.uri().parse().unwrap()).without_fallbacks()
    };
    Casa::new(config).unwrap()
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

async fn mount_ping(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(server)
        .await;
}

async fn mount_lights(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/luces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "ubicacion": "Sala", "status": 1 },
            { "id": 3, "ubicacion": "Cocina", "status": 0 }
        ])))
        .mount(server)
        .await;
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_accepted() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/usuario/login"))
        .and(body_json(json!({ "email": "ana@casa.mx", "pw": "secreta" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    let session = casa_for(&server)
        .login("ana@casa.mx", &secret("secreta"))
        .await
        .unwrap();
    assert_eq!(session.email, "ana@casa.mx");
}

#[tokio::test]
async fn test_login_refused_is_classified_as_rejected() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/usuario/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": false, "mensaje": "bad creds" })),
        )
        .mount(&server)
        .await;

    let err = casa_for(&server)
        .login("ana@casa.mx", &secret("nope"))
        .await
        .unwrap_err();
    let classified = classify("login", &err);
    assert_eq!(classified.category, ErrorCategory::Rejected);
    assert_eq!(classified.message, "bad creds");
}

#[tokio::test]
async fn test_login_without_message_uses_default() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/usuario/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = casa_for(&server)
        .login("ana@casa.mx", &secret("x"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Rejected by backend: Invalid credentials");
}

#[tokio::test]
async fn test_blank_email_never_reaches_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = casa_for(&server)
        .login("   ", &secret("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }), "{err:?}");
}

#[tokio::test]
async fn test_register_sends_default_status() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/usuario/agregar"))
        .and(body_json(json!({
            "nombre": "Luis",
            "email": "luis@casa.mx",
            "pw": "clave123",
            "status": "activo"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    let account = NewAccount {
        name: "Luis".into(),
        email: "luis@casa.mx".into(),
        password: secret("clave123"),
        status: None,
    };
    casa_for(&server).register(&account).await.unwrap();
}

#[tokio::test]
async fn test_users_and_delete() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/usuario"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": false,
            "status": 200,
            "body": [{ "id": 9, "nombre": "Ana", "email": "ana@casa.mx", "status": "activo" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/usuario/eliminar"))
        .and(body_json(json!({ "id": 9 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": true, "mensaje": "en uso" })),
        )
        .mount(&server)
        .await;

    let casa = casa_for(&server);
    let users = casa.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, 9);

    let err = casa.delete_user(9).await.unwrap_err();
    assert_eq!(err.to_string(), "Rejected by backend: en uso");
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_lights_and_doors_overview() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    mount_lights(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/puertas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "body": [{ "id": 2, "ubicacion": "Garaje", "status": 0 }]
        })))
        .mount(&server)
        .await;

    let (lights, doors) = casa_for(&server).overview().await;
    let lights = lights.unwrap();
    let doors = doors.unwrap();
    assert_eq!(lights.len(), 2);
    assert!(lights[0].is_on());
    assert!(!lights[1].is_on());
    assert_eq!(doors[0].display_name, "Garaje");
    assert!(doors[0].is_locked());
}

#[tokio::test]
async fn test_unexpected_shape_is_malformed() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/luces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foo": "bar" })))
        .mount(&server)
        .await;

    let err = casa_for(&server)
        .list_devices(DeviceKind::Light)
        .await
        .unwrap_err();
    assert_eq!(
        classify("list lights", &err).category,
        ErrorCategory::MalformedResponse
    );
}

#[tokio::test]
async fn test_missing_route_is_http_404() {
    let server = MockServer::start().await;
    mount_ping(&server).await;

    let err = casa_for(&server)
        .list_devices(DeviceKind::Door)
        .await
        .unwrap_err();
    assert_eq!(
        classify("list doors", &err).category,
        ErrorCategory::HttpError(404)
    );
}

#[tokio::test]
async fn test_lock_door_closes_it() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/puertas/estado/4"))
        .and(body_json(json!({ "status": 0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    casa_for(&server).lock_door(4).await.unwrap();
}

#[tokio::test]
async fn test_unlock_door_sends_open_status() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/puertas/estado/4"))
        .and(body_json(json!({ "status": 1 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": false, "mensaje": "cerradura trabada" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = casa_for(&server).unlock_door(4).await.unwrap_err();
    match err {
        CoreError::Rejected { message } => assert_eq!(message, "cerradura trabada"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_single_light_lookup() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/luces/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "body": [{ "id": 3, "ubicacion": "Cocina", "status": 1 }]
        })))
        .mount(&server)
        .await;

    let light = casa_for(&server)
        .get_device(DeviceKind::Light, 3)
        .await
        .unwrap();
    assert_eq!(light.display_name, "Cocina");
    assert!(light.state);
}

// ── Optimistic board ────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_sends_new_status() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    mount_lights(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/luces/estado/3"))
        .and(body_json(json!({ "status": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    let casa = casa_for(&server);
    let mut board = DeviceBoard::load(&casa, DeviceKind::Light).await.unwrap();
    let state = board.toggle(&casa, 3).await.unwrap();
    assert!(state);
    assert!(board.get(3).unwrap().is_on());
}

#[tokio::test]
async fn test_failed_toggle_rolls_back() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    mount_lights(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/luces/estado/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("relay stuck"))
        .mount(&server)
        .await;

    let casa = casa_for(&server);
    let mut board = DeviceBoard::load(&casa, DeviceKind::Light).await.unwrap();
    let err = board.toggle(&casa, 1).await.unwrap_err();

    assert!(matches!(err, CoreError::Http { status: 500, .. }), "{err:?}");
    assert!(board.get(1).unwrap().is_on());
}

#[tokio::test]
async fn test_toggle_unknown_device_is_not_found() {
    let casa = Casa::new(CasaConfig::default().without_fallbacks()).unwrap();
    let mut board = DeviceBoard::new(DeviceKind::Door, Vec::new());
    let err = board.toggle(&casa, 8).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }), "{err:?}");
}

// ── Connectivity ────────────────────────────────────────────────────

#[tokio::test]
async fn test_connection_report_tracks_memory() {
    let server = MockServer::start().await;
    mount_ping(&server).await;
    let casa = casa_for(&server);

    assert_eq!(casa.connection_report().remembered, None);
    let found = casa.reset_connection().await.unwrap();
    let report = casa.connection_report();
    assert_eq!(report.remembered, Some(found));
    assert_eq!(report.candidates.len(), 1);
}

#[tokio::test]
async fn test_concurrent_failures_share_one_advisory() {
    let server = MockServer::start().await;
    mount_ping(&server).await;

    let gate = AdvisoryGate::new();
    let (lights, doors) = casa_for(&server).overview().await;
    let shown: Vec<_> = [lights.unwrap_err(), doors.unwrap_err()]
        .iter()
        .filter_map(|_| gate.try_acquire())
        .collect();
    assert_eq!(shown.len(), 1);
}
