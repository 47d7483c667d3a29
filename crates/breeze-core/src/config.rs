// ── Runtime connection configuration ──
//
// Describes *how* to reach a Breeze tenant. Carries the token but never
// touches disk: the CLI (via breeze-config) constructs a `BreezeConfig`
// and hands it in.

use secrecy::SecretString;
use url::Url;

use breeze_api::TransportConfig;

/// Configuration for connecting to a single Breeze tenant.
#[derive(Debug, Clone)]
pub struct BreezeConfig {
    /// API root, e.g. `https://tenant.greenbyte.cloud/api/2.0/`.
    pub url: Url,
    /// Static API token, sent as the `Breeze-ApiToken` header.
    pub token: SecretString,
}

impl BreezeConfig {
    pub fn new(url: Url, token: SecretString) -> Self {
        Self { url, token }
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new(self.url.clone(), self.token.clone())
    }
}
