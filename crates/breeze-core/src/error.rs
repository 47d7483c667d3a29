// ── Core error types ──
//
// Errors surfaced by the object model. Transport failures arrive as
// `breeze_api::Error` and are translated by the `From` impl below, so
// callers only ever match on `CoreError`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport errors ─────────────────────────────────────────────
    /// The API answered with a non-200 status.
    #[error("Breeze API returned HTTP {status}")]
    Transport { status: u16, body: String },

    #[error("Cannot connect to Breeze API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("API error: {message}")]
    Api { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Unknown signal: {name}")]
    UnknownSignal { name: String },

    #[error("Malformed time series: {message}")]
    MalformedSeries { message: String },

    #[error("{entity} has no devices")]
    EmptyEntityState { entity: String },

    #[error("{entity_type} '{identifier}' not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// A member was expected to hold a signal after a batched fetch but
    /// the response carried no entry for it.
    #[error("Signal '{signal}' was not returned for {entity}")]
    SignalNotFetched { signal: String, entity: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// HTTP status, when the failure came from a non-200 response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<breeze_api::Error> for CoreError {
    fn from(err: breeze_api::Error) -> Self {
        match err {
            breeze_api::Error::Status { status, body } => CoreError::Transport { status, body },
            breeze_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else if let Some(status) = e.status() {
                    CoreError::Transport {
                        status: status.as_u16(),
                        body: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                    }
                }
            }
            breeze_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            breeze_api::Error::InvalidHeader(message) => CoreError::Config { message },
            breeze_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Deserialization error: {message}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_maps_to_transport() {
        let err: CoreError = breeze_api::Error::Status {
            status: 404,
            body: "missing".into(),
        }
        .into();
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(matches!(err, CoreError::Transport { ref body, .. } if body == "missing"));
    }

    #[test]
    fn invalid_header_maps_to_config() {
        let err: CoreError = breeze_api::Error::InvalidHeader("bad token".into()).into();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
