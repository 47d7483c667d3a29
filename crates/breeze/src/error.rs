//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use breeze_config::ConfigError;
use breeze_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to Breeze at {url}")]
    #[diagnostic(
        code(breeze::connection_failed),
        help(
            "Check the API root URL and your network.\n\
             URL: {url}\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(breeze::auth_failed),
        help(
            "Verify the API token for this tenant.\n\
             Set it with --token, BREEZE_TOKEN, or token_env in your profile."
        )
    )]
    AuthFailed { status: u16 },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(breeze::no_token),
        help(
            "Configure one with: breeze --url <URL> config init --token-env <VAR>\n\
             Or set the BREEZE_TOKEN environment variable."
        )
    )]
    NoToken { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(breeze::not_found),
        help("Run: breeze {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("No data for signal '{signal}' on {entity}")]
    #[diagnostic(
        code(breeze::no_data),
        help("The API returned no entry for this entity in the requested window.")
    )]
    NoData { signal: String, entity: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Breeze API returned HTTP {status}")]
    #[diagnostic(code(breeze::http_status))]
    HttpStatus { status: u16, body: String },

    #[error("API error: {message}")]
    #[diagnostic(code(breeze::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(breeze::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(breeze::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: breeze --url <URL> config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No configuration found")]
    #[diagnostic(
        code(breeze::no_config),
        help(
            "Pass --url and --token, or create a profile with: breeze --url <URL> config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(breeze::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(breeze::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoToken { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Transport { status, .. } if status == 401 || status == 403 => {
                CliError::AuthFailed { status }
            }
            CoreError::Transport { status, body } => CliError::HttpStatus { status, body },

            CoreError::UnknownSignal { name } => CliError::NotFound {
                resource_type: "signal".into(),
                identifier: name,
                list_command: "signals".into(),
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{entity_type}s"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::SignalNotFetched { signal, entity } => CliError::NoData { signal, entity },

            CoreError::EmptyEntityState { entity } => CliError::ApiError {
                message: format!("{entity} has no devices"),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Api { message } | CoreError::MalformedSeries { message } => {
                CliError::ApiError { message }
            }
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoToken { profile } => CliError::NoToken { profile },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Serialization(e) => CliError::Render(e.to_string()),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
