//! `casa overview`: lights and doors fetched concurrently.
//!
//! When both fetches fail they almost always share a cause, so only the
//! first failure is shown in full; the rest are logged.

use serde::Serialize;
use tracing::warn;

use casa_core::{AdvisoryGate, Casa, CoreError, Device, DeviceKind};

use crate::config::Settings;
use crate::error::{CliError, During};
use crate::output;

use super::devices::DeviceRow;
use super::op;

#[derive(Serialize)]
struct Overview {
    lights: Vec<Device>,
    doors: Vec<Device>,
}

pub async fn handle(casa: &Casa, settings: &Settings) -> Result<(), CliError> {
    let (lights, doors) = casa.overview().await;

    let mut failures = Vec::new();
    let overview = Overview {
        lights: settle(lights, DeviceKind::Light, &mut failures),
        doors: settle(doors, DeviceKind::Door, &mut failures),
    };

    let color = output::should_color(settings.color);
    let out = output::render_single(
        settings.output,
        &overview,
        |o| {
            let section = |title: &str, devices: &[Device]| {
                let rows: Vec<DeviceRow> =
                    devices.iter().map(|d| DeviceRow::new(d, color)).collect();
                format!("{title}\n{}", output::render_table(&rows))
            };
            format!(
                "{}\n\n{}",
                section("Lights", &o.lights),
                section("Doors", &o.doors)
            )
        },
        |o| {
            o.lights
                .iter()
                .chain(&o.doors)
                .map(|d| format!("{}:{}", d.kind, d.id))
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, settings.quiet);

    if failures.is_empty() {
        return Ok(());
    }

    let failed = failures.len();
    let gate = AdvisoryGate::global();
    let mut showing = None;
    for failure in failures {
        if let Some(guard) = gate.try_acquire() {
            eprintln!("{:?}", miette::Report::new(failure));
            showing = Some(guard);
        } else {
            warn!(error = %failure, "advisory suppressed");
        }
    }
    drop(showing);

    Err(CliError::Incomplete { failed, total: 2 })
}

fn settle(
    result: Result<Vec<Device>, CoreError>,
    kind: DeviceKind,
    failures: &mut Vec<CliError>,
) -> Vec<Device> {
    result.during(&op("list", kind)).unwrap_or_else(|err| {
        failures.push(err);
        Vec::new()
    })
}
