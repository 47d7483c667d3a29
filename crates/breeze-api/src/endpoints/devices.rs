// Inventory endpoints: devices.json and datasignals.json

use tracing::debug;

use crate::client::BreezeClient;
use crate::error::Error;
use crate::models::{DataSignalRecord, DeviceRecord};
use crate::query::QueryParams;

#[derive(Debug, Clone, Default)]
pub struct DevicesQuery {
    pub device_type_ids: Vec<i64>,
    pub fields: Vec<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl DevicesQuery {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .list("deviceTypeIds", &self.device_type_ids)
            .list("fields", &self.fields)
            .opt("page", self.page)
            .opt("pageSize", self.page_size)
    }
}

impl BreezeClient {
    /// List devices visible to the token.
    ///
    /// `GET devices.json`
    pub fn devices(&self, query: &DevicesQuery) -> Result<Vec<DeviceRecord>, Error> {
        debug!("listing devices");
        self.get("devices", &query.to_params())
    }

    /// List signal definitions, optionally restricted to some devices.
    ///
    /// `GET datasignals.json`
    pub fn data_signals(&self, device_ids: &[i64]) -> Result<Vec<DataSignalRecord>, Error> {
        debug!(devices = device_ids.len(), "listing data signals");
        let params = QueryParams::new().list("deviceIds", device_ids);
        self.get("datasignals", &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_devices_query_is_empty() {
        assert_eq!(DevicesQuery::default().to_params().to_query_string(), "");
    }

    #[test]
    fn devices_query_renders_paging() {
        let q = DevicesQuery {
            device_type_ids: vec![1],
            page: Some(2),
            page_size: Some(100),
            ..DevicesQuery::default()
        };
        assert_eq!(
            q.to_params().to_query_string(),
            "deviceTypeIds=1&page=2&pageSize=100"
        );
    }
}
