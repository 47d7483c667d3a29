//! Site command handler.

use serde::Serialize;
use tabled::Tabled;

use breeze_core::{Breeze, Entity, Location, Site, SiteKind};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct SiteSummary {
    id: i64,
    title: String,
    site_type: SiteKind,
    devices: usize,
    location: Option<Location>,
}

impl From<&Site> for SiteSummary {
    fn from(s: &Site) -> Self {
        Self {
            id: s.id(),
            title: s.title().to_owned(),
            site_type: s.site_type(),
            devices: s.device_count(),
            location: s.location().ok(),
        }
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    site_type: String,
    #[tabled(rename = "Devices")]
    devices: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&SiteSummary> for SiteRow {
    fn from(s: &SiteSummary) -> Self {
        Self {
            id: s.id.to_string(),
            title: s.title.clone(),
            site_type: s.site_type.to_string(),
            devices: s.devices.to_string(),
            location: s.location.map(|l| l.to_string()).unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(api: &Breeze, global: &GlobalOpts) -> Result<(), CliError> {
    let summaries: Vec<SiteSummary> = api
        .all_sites()
        .iter()
        .map(|s| SiteSummary::from(s.as_ref()))
        .collect();
    let out = output::render_list(
        &global.output,
        &summaries,
        |s| SiteRow::from(s),
        |s| s.title.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
