// Transport: the single network seam of the SDK.
//
// `Transport` is what the object model talks to. `HttpTransport` is the
// real implementation: a blocking reqwest client with the token header
// baked into its default headers. Tests swap in an in-memory transport.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::query::QueryParams;

/// Header carrying the static API token on every request.
pub const TOKEN_HEADER: &str = "Breeze-ApiToken";

/// A blocking GET against a Breeze endpoint, returning decoded JSON.
///
/// Implementations return `Error::Status` for any non-200 response.
pub trait Transport {
    fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Value, Error>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Value, Error> {
        (**self).get(endpoint, params)
    }
}

/// Connection settings for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// API root, e.g. `https://example.greenbyte.cloud/api/2.0/`.
    pub base_url: Url,
    pub token: SecretString,
    pub user_agent: String,
}

impl TransportConfig {
    pub fn new(base_url: Url, token: SecretString) -> Self {
        Self {
            base_url,
            token,
            user_agent: concat!("breeze-sdk/", env!("CARGO_PKG_VERSION")).into(),
        }
    }

    /// Build a blocking `reqwest` client that sends the token header.
    pub fn build_client(&self) -> Result<reqwest::blocking::Client, Error> {
        let mut token = HeaderValue::from_str(self.token.expose_secret())
            .map_err(|e| Error::InvalidHeader(format!("{TOKEN_HEADER}: {e}")))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token);

        reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self::with_client(http, config.base_url.clone()))
    }

    /// Use a pre-built client. The caller is responsible for the token header.
    pub fn with_client(http: reqwest::blocking::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base_url}{endpoint}.json?{query}`
    pub fn endpoint_url(&self, endpoint: &str, params: &QueryParams) -> Result<Url, Error> {
        let base = self.base_url.as_str();
        let sep = if base.ends_with('/') { "" } else { "/" };
        let full = format!("{base}{sep}{endpoint}.json?{params}");
        Ok(Url::parse(&full)?)
    }
}

impl Transport for HttpTransport {
    fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Value, Error> {
        let url = self.endpoint_url(endpoint, params)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send()?;
        let status = resp.status();
        let body = resp.text()?;
        debug!(status = status.as_u16(), bytes = body.len(), "response");

        if status != reqwest::StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
