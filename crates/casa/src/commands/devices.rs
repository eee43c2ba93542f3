//! Light and door command handlers.
//!
//! Both families share one code path keyed on `DeviceKind`; only the
//! sub-command names differ.

use tabled::Tabled;

use casa_core::{Casa, Device, DeviceBoard, DeviceKind};

use crate::cli::{DoorsArgs, DoorsCommand, LightsArgs, LightsCommand};
use crate::config::Settings;
use crate::error::{CliError, During};
use crate::output;

use super::op;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct DeviceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
}

impl DeviceRow {
    pub(crate) fn new(d: &Device, color: bool) -> Self {
        Self {
            id: d.id,
            name: d.display_name.clone(),
            state: output::paint_state(d.state_label(), d.state, color),
        }
    }
}

fn detail(d: &Device) -> String {
    [
        format!("ID:     {}", d.id),
        format!("Name:   {}", d.display_name),
        format!("Kind:   {}", d.kind),
        format!("State:  {}", d.state_label()),
        format!("Status: {}", d.status_code()),
    ]
    .join("\n")
}

// ── Shared operations ───────────────────────────────────────────────

enum DeviceOp {
    List,
    Get(i64),
    Set(i64, bool),
    Toggle(i64),
    Filter(String),
}

pub async fn handle_lights(casa: &Casa, args: LightsArgs, settings: &Settings) -> Result<(), CliError> {
    let action = match args.command {
        LightsCommand::List => DeviceOp::List,
        LightsCommand::Get { id } => DeviceOp::Get(id),
        LightsCommand::On { id } => DeviceOp::Set(id, true),
        LightsCommand::Off { id } => DeviceOp::Set(id, false),
        LightsCommand::Toggle { id } => DeviceOp::Toggle(id),
        LightsCommand::At { location } => DeviceOp::Filter(location),
    };
    run(casa, DeviceKind::Light, action, settings).await
}

pub async fn handle_doors(casa: &Casa, args: DoorsArgs, settings: &Settings) -> Result<(), CliError> {
    let action = match args.command {
        DoorsCommand::List => DeviceOp::List,
        DoorsCommand::Get { id } => DeviceOp::Get(id),
        DoorsCommand::Close { id } => DeviceOp::Set(id, true),
        DoorsCommand::Open { id } => DeviceOp::Set(id, false),
        DoorsCommand::Toggle { id } => DeviceOp::Toggle(id),
        DoorsCommand::OfType { door_type } => DeviceOp::Filter(door_type),
    };
    run(casa, DeviceKind::Door, action, settings).await
}

async fn run(casa: &Casa, kind: DeviceKind, action: DeviceOp, settings: &Settings) -> Result<(), CliError> {
    match action {
        DeviceOp::List => {
            let devices = casa.list_devices(kind).await.during(&op("list", kind))?;
            print_list(&devices, settings);
        }

        DeviceOp::Filter(filter) => {
            let devices = match kind {
                DeviceKind::Light => casa.lights_at(&filter).await,
                DeviceKind::Door => casa.doors_of_type(&filter).await,
            }
            .during(&op("filter", kind))?;
            print_list(&devices, settings);
        }

        DeviceOp::Get(id) => {
            let device = casa.get_device(kind, id).await.during(&format!("get {kind} {id}"))?;
            let out = output::render_single(settings.output, &device, detail, |d| d.id.to_string());
            output::print_output(&out, settings.quiet);
        }

        DeviceOp::Set(id, state) => {
            casa.set_device_state(kind, id, state)
                .await
                .during(&format!("update {kind} {id}"))?;
            output::print_status(
                &format!("{kind} {id} is now {}", kind.state_label(state)),
                settings.quiet,
            );
        }

        DeviceOp::Toggle(id) => {
            let mut board = DeviceBoard::load(casa, kind).await.during(&op("list", kind))?;
            let state = board
                .toggle(casa, id)
                .await
                .during(&format!("toggle {kind} {id}"))?;
            output::print_status(
                &format!("{kind} {id} is now {}", kind.state_label(state)),
                settings.quiet,
            );
        }
    }
    Ok(())
}

fn print_list(devices: &[Device], settings: &Settings) {
    let color = output::should_color(settings.color);
    let out = output::render_list(
        settings.output,
        devices,
        |d| DeviceRow::new(d, color),
        |d| d.id.to_string(),
    );
    output::print_output(&out, settings.quiet);
}
