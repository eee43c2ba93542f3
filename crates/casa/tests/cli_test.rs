//! Integration tests for the `casa` CLI binary.
//!
//! Argument parsing, help, completions, and config handling run without a
//! backend; the rest talk to a wiremock server with fallbacks disabled.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `casa` binary with env isolation.
///
/// Clears all `CASA_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn casa_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("casa");
    cmd.env("HOME", "/tmp/casa-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/casa-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("CASA_CONFIG")
        .env_remove("CASA_API_URL")
        .env_remove("CASA_FALLBACK_HOSTS")
        .env_remove("CASA_DEFAULT_FALLBACKS")
        .env_remove("CASA_REQUEST_TIMEOUT_MS")
        .env_remove("CASA_PROBE_TIMEOUT_MS")
        .env_remove("CASA_OUTPUT")
        .env_remove("CASA_COLOR")
        .env_remove("CASA_PASSWORD");
    cmd
}

/// A `casa` command pointed only at `server`.
fn against(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = casa_cmd();
    cmd.args(["--api-url", &server.uri(), "--no-fallbacks", "--timeout", "2000"]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a blocking `assert_cmd` invocation without stalling the mock server.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = casa_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    casa_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("lights")
            .and(predicate::str::contains("doors"))
            .and(predicate::str::contains("--api-url")),
    );
}

#[test]
fn test_version_flag() {
    casa_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("casa"));
}

#[test]
fn test_completions_zsh() {
    casa_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_subcommand() {
    let output = casa_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("foobar"), "{text}");
}

#[test]
fn test_endpoints_plain() {
    casa_cmd()
        .args(["endpoints", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("GET /api/ping")
                .and(predicate::str::contains("POST /api/luces/estado/:id")),
        );
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("casa.toml");
    let file_arg = file.to_str().unwrap();

    casa_cmd()
        .args(["--config", file_arg, "--api-url", "http://192.168.1.20:4000"])
        .args(["config", "init"])
        .assert()
        .success();
    assert!(file.exists());

    casa_cmd()
        .args(["--config", file_arg, "config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://192.168.1.20:4000"));

    casa_cmd()
        .args(["--config", file_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_bad_api_url_is_rejected() {
    let output = casa_cmd()
        .args(["--api-url", "not a url", "lights", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("api_url"));
}

// ── Backend ─────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_lights_list_json() {
    let server = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/luces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "body": [{ "id": 1, "ubicacion": "Sala", "status": 1 }]
        })))
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["lights", "list", "-o", "json-compact"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(r#""display_name":"Sala","state":true,"kind":"light""#),
        "{stdout}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_door_lock_sends_closed_status() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/api/puertas/estado/2"))
        .and(body_json(json!({ "status": 0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["doors", "lock", "2"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("door 2 is now closed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_refused_exit_code() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/api/usuario/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": false, "mensaje": "bad creds" })),
        )
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["login", "ana@casa.mx", "--password", "x"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("bad creds"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_route_reports_http_404() {
    let server = backend().await;

    let mut cmd = against(&server);
    cmd.args(["doors", "list"]);
    let output = run(cmd).await;

    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("HTTP 404"), "{text}");
}

#[test]
fn test_unreachable_backend_exit_code() {
    let output = casa_cmd()
        .args(["--api-url", "http://127.0.0.1:1", "--no-fallbacks"])
        .args(["lights", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}
