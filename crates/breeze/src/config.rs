//! CLI configuration: thin wrapper around `breeze_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--url, --token).

use secrecy::SecretString;

use breeze_core::BreezeConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use breeze_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build a `BreezeConfig` from the config file, profile, and CLI overrides.
///
/// Flags win over profile values. Without a matching profile, `--url` and
/// `--token` must both be given.
pub fn build_breeze_config(global: &GlobalOpts) -> Result<BreezeConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: names.join(", "),
        });
    }

    let url_str = global.url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = breeze_config::parse_url(url_str)?;

    let token = global
        .token
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::NoToken {
            profile: profile_name,
        })?;

    Ok(BreezeConfig::new(url, token))
}

/// Translate a `Profile` + global flags into a `BreezeConfig`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<BreezeConfig, CliError> {
    // 1. URL (flag > env > profile)
    let url_str = global.url.as_deref().unwrap_or(&profile.url);
    let url = breeze_config::parse_url(url_str)?;

    // 2. Token (flag > profile chain)
    let token = match global.token {
        Some(ref token) => SecretString::from(token.clone()),
        None => breeze_config::resolve_token(profile, profile_name)?,
    };

    Ok(BreezeConfig::new(url, token))
}
