//! Connectivity commands: `ping`, `diagnose`, `endpoints`.

use serde::Serialize;
use tabled::Tabled;

use casa_core::{Casa, ConnectionReport, endpoints};

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

pub async fn ping(casa: &Casa, settings: &Settings) -> Result<(), CliError> {
    let Some(found) = casa.check_availability().await else {
        return Err(no_backend(&casa.connection_report()));
    };
    output::print_output(found.as_str(), settings.quiet);
    Ok(())
}

pub async fn diagnose(casa: &Casa, settings: &Settings) -> Result<(), CliError> {
    let found = casa.reset_connection().await;
    let report = casa.connection_report();

    let out = output::render_single(settings.output, &report, report_detail, |r| {
        r.remembered
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    });
    output::print_output(&out, settings.quiet);

    match found {
        Some(_) => Ok(()),
        None => Err(no_backend(&report)),
    }
}

fn report_detail(report: &ConnectionReport) -> String {
    let mut lines = vec![format!(
        "Connected: {}",
        report
            .remembered
            .as_ref()
            .map_or_else(|| "none".into(), ToString::to_string)
    )];
    lines.push(String::from("Candidates:"));
    for (i, host) in report.candidates.iter().enumerate() {
        let marker = if report.remembered.as_ref() == Some(host) {
            "*"
        } else {
            " "
        };
        lines.push(format!("  {marker} {:>2}. {host}", i + 1));
    }
    lines.join("\n")
}

fn no_backend(report: &ConnectionReport) -> CliError {
    CliError::NoBackend {
        tried: report
            .candidates
            .iter()
            .map(url::Url::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

// ── Endpoint reference ──────────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct EndpointRow {
    #[tabled(rename = "Method")]
    method: &'static str,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Purpose")]
    purpose: &'static str,
}

fn row(method: &'static str, path: impl Into<String>, purpose: &'static str) -> EndpointRow {
    EndpointRow {
        method,
        path: path.into(),
        purpose,
    }
}

pub fn list_endpoints(settings: &Settings) {
    let lights = endpoints::LIGHTS;
    let doors = endpoints::DOORS;
    let rows = [
        row("GET", endpoints::PING, "reachability probe"),
        row("POST", endpoints::LOGIN, "log in"),
        row("POST", endpoints::REGISTER, "create account"),
        row("GET", endpoints::USERS, "list users"),
        row("POST", endpoints::DELETE_USER, "delete user"),
        row("GET", lights, "list lights"),
        row("GET", format!("{lights}/:id"), "one light"),
        row("GET", format!("{lights}/ubicacion/:ubicacion"), "lights at a location"),
        row("POST", format!("{lights}/estado/:id"), "switch a light"),
        row("GET", doors, "list doors"),
        row("GET", format!("{doors}/:id"), "one door"),
        row("GET", format!("{doors}/tipo/:tipo"), "doors of a type"),
        row("POST", format!("{doors}/estado/:id"), "move a door"),
    ];

    let out = output::render_list(
        settings.output,
        &rows,
        EndpointRow::clone,
        |r| format!("{} {}", r.method, r.path),
    );
    output::print_output(&out, settings.quiet);
}
