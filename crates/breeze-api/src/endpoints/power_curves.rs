// Power curve endpoint

use chrono::NaiveDateTime;
use tracing::debug;

use crate::client::BreezeClient;
use crate::error::Error;
use crate::query::QueryParams;

#[derive(Debug, Clone, Default)]
pub struct PowerCurvesQuery {
    pub device_ids: Vec<i64>,
    pub timestamp: Option<NaiveDateTime>,
    /// `true` for the learned curve, `false` for the contractual one.
    pub learned: Option<bool>,
}

impl PowerCurvesQuery {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .list("deviceIds", &self.device_ids)
            .timestamp("timestamp", self.timestamp)
            .opt("learned", self.learned)
    }
}

impl BreezeClient {
    /// Power curves for the given devices.
    ///
    /// `GET powercurves.json`
    pub fn power_curves(&self, query: &PowerCurvesQuery) -> Result<serde_json::Value, Error> {
        debug!(devices = query.device_ids.len(), "fetching power curves");
        self.call("powercurves", &query.to_params())
    }
}
