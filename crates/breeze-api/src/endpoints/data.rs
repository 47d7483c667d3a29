// Time-series endpoints: data.json and realtimedata.json

use chrono::NaiveDateTime;
use tracing::debug;

use crate::client::BreezeClient;
use crate::error::Error;
use crate::models::DataEntry;
use crate::query::QueryParams;

/// Historical data request.
///
/// `aggregate` selects the grouping of the returned entries (`"site"` to
/// get one entry per site; unset for one entry per device).
#[derive(Debug, Clone, Default)]
pub struct DataQuery {
    pub device_ids: Vec<i64>,
    pub data_signal_ids: Vec<i64>,
    pub timestamp_start: Option<NaiveDateTime>,
    pub timestamp_end: Option<NaiveDateTime>,
    pub resolution: Option<String>,
    pub aggregate: Option<String>,
    pub calculation: Option<String>,
}

impl DataQuery {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .list("deviceIds", &self.device_ids)
            .list("dataSignalIds", &self.data_signal_ids)
            .timestamp("timestampStart", self.timestamp_start)
            .timestamp("timestampEnd", self.timestamp_end)
            .opt("resolution", self.resolution.as_deref())
            .opt("aggregate", self.aggregate.as_deref())
            .opt("calculation", self.calculation.as_deref())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RealTimeDataQuery {
    pub device_ids: Vec<i64>,
    pub data_signal_ids: Vec<i64>,
    pub aggregate: Option<String>,
    pub calculation: Option<String>,
}

impl RealTimeDataQuery {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .list("deviceIds", &self.device_ids)
            .list("dataSignalIds", &self.data_signal_ids)
            .opt("aggregate", self.aggregate.as_deref())
            .opt("calculation", self.calculation.as_deref())
    }
}

impl BreezeClient {
    /// Historical time series, one entry per aggregate.
    ///
    /// `GET data.json`
    pub fn data(&self, query: &DataQuery) -> Result<Vec<DataEntry>, Error> {
        debug!(
            devices = query.device_ids.len(),
            signals = query.data_signal_ids.len(),
            aggregate = query.aggregate.as_deref().unwrap_or("device"),
            "fetching data"
        );
        self.get("data", &query.to_params())
    }

    /// Latest values. Loosely typed: the shape differs from `data.json`.
    ///
    /// `GET realtimedata.json`
    pub fn real_time_data(&self, query: &RealTimeDataQuery) -> Result<serde_json::Value, Error> {
        debug!(devices = query.device_ids.len(), "fetching real-time data");
        self.call("realtimedata", &query.to_params())
    }
}
