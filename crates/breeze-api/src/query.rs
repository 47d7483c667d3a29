// Query-string construction
//
// Every Breeze endpoint takes flat named parameters. Unset parameters are
// kept in the builder but dropped when the query string is rendered, so
// endpoint methods can pass every optional argument through unconditionally.

use std::fmt::{self, Display};

use chrono::NaiveDateTime;
use url::form_urlencoded::byte_serialize;

/// Wire format for `timestampStart` / `timestampEnd` style parameters.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Ordered list of named query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. An empty value is omitted from the rendered query.
    pub fn param(mut self, name: &str, value: impl Display) -> Self {
        self.pairs.push((name.to_owned(), value.to_string()));
        self
    }

    /// Add a parameter only when `value` is set.
    pub fn opt<V: Display>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    /// Add a list parameter, comma-joined (`deviceIds=1,2,3`).
    pub fn list<V: Display>(self, name: &str, values: &[V]) -> Self {
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.param(name, joined)
    }

    /// Add a timestamp parameter in the API's `YYYY-MM-DDTHH:MM:SS` form.
    pub fn timestamp(self, name: &str, value: Option<NaiveDateTime>) -> Self {
        self.opt(name, value.map(|ts| ts.format(TIMESTAMP_FORMAT)))
    }

    /// Look up the value of a parameter, empty or not.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters that will actually be sent.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }

    /// Render as `name=value` pairs joined by `&`, skipping empty values.
    ///
    /// Names and values are percent-encoded. A literal `,` in a value is
    /// kept, since the API reads it as the list separator.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .map(|(k, v)| format!("{}={}", encode(k), encode_value(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}

fn encode_value(raw: &str) -> String {
    raw.split(',').map(encode).collect::<Vec<_>>().join(",")
}

impl Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
