//! Clap derive structures for the `breeze` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// breeze -- browse sites, devices and signals of a Breeze tenant
#[derive(Debug, Parser)]
#[command(
    name = "breeze",
    version,
    about = "Query wind and solar assets from the Breeze API",
    long_about = "Navigate a Breeze tenant as sites, devices and signals.\n\n\
        Signal data is fetched in batches: one request per signal name \
        for all selected sites or devices.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Tenant profile to use
    #[arg(long, short = 'p', env = "BREEZE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, short = 'u', env = "BREEZE_URL", global = true)]
    pub url: Option<String>,

    /// API token (overrides profile)
    #[arg(long, env = "BREEZE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BREEZE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List sites with their type and location
    #[command(alias = "s")]
    Sites,

    /// List devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List the signal names known to the tenant
    Signals,

    /// Fetch signal data for sites or devices
    Data(DataArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Only devices of these sites (repeatable)
    #[arg(long, short = 's')]
    pub site: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DATA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DataArgs {
    /// Signal names, e.g. "Power" "Wind speed"
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Restrict to these sites (repeatable)
    #[arg(long, short = 's')]
    pub site: Vec<String>,

    /// Fetch per device instead of per site; restricts to these devices
    /// when given names (repeatable)
    #[arg(long, short = 'd', num_args = 0..)]
    pub device: Option<Vec<String>>,

    /// Window start, `YYYY-MM-DDTHH:MM:SS` (default: midnight a week ago)
    #[arg(long, value_parser = parse_timestamp, requires = "end")]
    pub start: Option<NaiveDateTime>,

    /// Window end, `YYYY-MM-DDTHH:MM:SS` (default: now)
    #[arg(long, value_parser = parse_timestamp, requires = "start")]
    pub end: Option<NaiveDateTime>,
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {e}"))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile from --url and --token-env / --token
    Init {
        /// Name of an environment variable holding the token
        #[arg(long)]
        token_env: Option<String>,

        /// Profile name (default: the active profile)
        #[arg(long)]
        name: Option<String>,
    },

    /// Display current configuration (tokens masked)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
