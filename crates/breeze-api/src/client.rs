// Breeze API client
//
// Wraps a `Transport` with connectivity tracking and typed decoding.
// Endpoint methods live in `endpoints/` as inherent impls so this module
// stays focused on call mechanics.

use std::cell::Cell;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;
use crate::query::QueryParams;
use crate::transport::{HttpTransport, Transport, TransportConfig};

/// Client for the Breeze REST API.
///
/// Every call is blocking. The `connected` flag flips to `true` after the
/// first successful (HTTP 200) response and never flips back.
pub struct BreezeClient {
    transport: Box<dyn Transport>,
    connected: Cell<bool>,
}

impl BreezeClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            connected: Cell::new(false),
        }
    }

    /// Build a client backed by the HTTP transport.
    pub fn connect(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self::new(Box::new(HttpTransport::new(config)?)))
    }

    /// Whether any call has succeeded yet.
    pub fn connected(&self) -> bool {
        self.connected.get()
    }

    /// Raw endpoint call returning the decoded JSON document.
    pub fn call(&self, endpoint: &str, params: &QueryParams) -> Result<Value, Error> {
        let value = self.transport.get(endpoint, params)?;
        self.connected.set(true);
        Ok(value)
    }

    /// Endpoint call decoded into `T`.
    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<T, Error> {
        let value = self.call(endpoint, params)?;
        T::deserialize(&value).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }
}

impl std::fmt::Debug for BreezeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreezeClient")
            .field("connected", &self.connected.get())
            .finish_non_exhaustive()
    }
}
