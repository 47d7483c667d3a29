//! Batched signal data fetch.

use std::rc::Rc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tabled::Tabled;

use breeze_core::{Breeze, DeviceSelector, Selector, Signal, TimeWindow};

use crate::cli::{DataArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct SignalSummary {
    owner: String,
    signal: String,
    points: usize,
    mean: Option<f64>,
    first: Option<NaiveDateTime>,
    last: Option<NaiveDateTime>,
}

impl From<&Rc<Signal>> for SignalSummary {
    fn from(s: &Rc<Signal>) -> Self {
        let series = s.series();
        Self {
            owner: format!("{} {}", s.owner().kind, s.owner().title),
            signal: s.title().to_owned(),
            points: series.len(),
            mean: series.mean(),
            first: series.first_timestamp(),
            last: series.last_timestamp(),
        }
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SignalRow {
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Mean")]
    mean: String,
}

impl From<&SignalSummary> for SignalRow {
    fn from(s: &SignalSummary) -> Self {
        Self {
            owner: s.owner.clone(),
            signal: s.signal.clone(),
            points: s.points.to_string(),
            mean: s.mean.map(|m| format!("{m:.3}")).unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(api: &mut Breeze, args: &DataArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if let (Some(start), Some(end)) = (args.start, args.end) {
        if start >= end {
            return Err(CliError::Validation {
                field: "window".into(),
                reason: format!("start {start} is not before end {end}"),
            });
        }
        api.set_window(TimeWindow::new(start, end));
    }
    let api = &*api;

    let sites = if args.site.is_empty() {
        api.sites(Selector::All)
    } else {
        api.sites(args.site.clone())
    };

    let signals = match &args.device {
        None => sites.signals(api, &args.names)?,
        Some(names) => {
            let selector = if names.is_empty() {
                DeviceSelector::All
            } else {
                DeviceSelector::from(names.clone())
            };
            let devices = sites.devices(selector).unwrap_or_default();
            devices.signals(api, &args.names)?
        }
    };

    let summaries: Vec<SignalSummary> = signals.iter().map(SignalSummary::from).collect();
    let out = output::render_list(
        &global.output,
        &summaries,
        |s| SignalRow::from(s),
        |s| format!("{}\t{}\t{}", s.owner, s.signal, s.points),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
