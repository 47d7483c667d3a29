//! Device command handler.

use serde::Serialize;
use tabled::Tabled;

use breeze_core::{Breeze, Device, DeviceKind, DeviceSelector, Entity, Selector};

use crate::cli::{DevicesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct DeviceSummary {
    id: i64,
    title: String,
    site: String,
    device_type: DeviceKind,
    latitude: f64,
    longitude: f64,
}

impl From<&Device> for DeviceSummary {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id(),
            title: d.title().to_owned(),
            site: d.site().to_owned(),
            device_type: d.kind().clone(),
            latitude: d.location().latitude,
            longitude: d.location().longitude,
        }
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&DeviceSummary> for DeviceRow {
    fn from(d: &DeviceSummary) -> Self {
        Self {
            id: d.id.to_string(),
            title: d.title.clone(),
            site: d.site.clone(),
            device_type: d.device_type.to_string(),
            location: format!("{:.5}, {:.5}", d.latitude, d.longitude),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(api: &Breeze, args: &DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let sites = if args.site.is_empty() {
        api.sites(Selector::All)
    } else {
        api.sites(args.site.clone())
    };
    let devices = sites.devices(DeviceSelector::All).unwrap_or_default();

    let summaries: Vec<DeviceSummary> = devices
        .iter()
        .map(|d| DeviceSummary::from(d.as_ref()))
        .collect();
    let out = output::render_list(
        &global.output,
        &summaries,
        |d| DeviceRow::from(d),
        |d| d.title.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
