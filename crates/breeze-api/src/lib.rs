// breeze-api: Blocking Rust client for the Breeze monitoring REST API

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod query;
pub mod transport;

pub use client::BreezeClient;
pub use endpoints::{
    ActiveAlertsQuery, ActiveStatusQuery, AlertsQuery, DataQuery, DevicesQuery, Paging,
    PowerCurvesQuery, RealTimeDataQuery, StatusEventsQuery,
};
pub use error::Error;
pub use models::{DataEntry, DataSignalRecord, DataSignalRef, DeviceRecord, SiteRef};
pub use query::QueryParams;
pub use transport::{HttpTransport, Transport, TransportConfig, TOKEN_HEADER};
