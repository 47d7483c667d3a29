//! Signal name listing.

use tabled::Tabled;

use breeze_core::Breeze;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SignalRow {
    #[tabled(rename = "Signal")]
    name: String,
}

pub fn handle(api: &Breeze, global: &GlobalOpts) -> Result<(), CliError> {
    let names = api.signal_names();
    let out = output::render_list(
        &global.output,
        &names,
        |n| SignalRow { name: n.clone() },
        Clone::clone,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
