// Status and alert endpoints
//
// These return loosely-typed JSON because the field set depends on the
// `fields` parameter and on the tenant's configuration.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::client::BreezeClient;
use crate::error::Error;
use crate::query::QueryParams;

/// Shared sort/paging parameters of the event listings.
#[derive(Debug, Clone, Default)]
pub struct Paging {
    pub sort_by: Vec<String>,
    pub sort_asc: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl Paging {
    fn apply(&self, params: QueryParams) -> QueryParams {
        params
            .list("sortBy", &self.sort_by)
            .opt("sortAsc", self.sort_asc)
            .opt("page", self.page)
            .opt("pageSize", self.page_size)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusEventsQuery {
    pub device_ids: Vec<i64>,
    pub timestamp_start: Option<NaiveDateTime>,
    pub timestamp_end: Option<NaiveDateTime>,
    pub category: Vec<String>,
    pub fields: Vec<String>,
    pub paging: Paging,
}

impl StatusEventsQuery {
    pub fn to_params(&self) -> QueryParams {
        let params = QueryParams::new()
            .list("deviceIds", &self.device_ids)
            .timestamp("timestampStart", self.timestamp_start)
            .timestamp("timestampEnd", self.timestamp_end)
            .list("category", &self.category)
            .list("fields", &self.fields);
        self.paging.apply(params)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActiveStatusQuery {
    pub device_ids: Vec<i64>,
    pub category: Vec<String>,
    pub fields: Vec<String>,
    pub paging: Paging,
}

impl ActiveStatusQuery {
    pub fn to_params(&self) -> QueryParams {
        let params = QueryParams::new()
            .list("deviceIds", &self.device_ids)
            .list("category", &self.category)
            .list("fields", &self.fields);
        self.paging.apply(params)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlertsQuery {
    pub device_ids: Vec<i64>,
    pub timestamp_start: Option<NaiveDateTime>,
    pub timestamp_end: Option<NaiveDateTime>,
    pub rule_ids: Vec<i64>,
    pub fields: Vec<String>,
    pub paging: Paging,
}

impl AlertsQuery {
    pub fn to_params(&self) -> QueryParams {
        let params = QueryParams::new()
            .list("deviceIds", &self.device_ids)
            .timestamp("timestampStart", self.timestamp_start)
            .timestamp("timestampEnd", self.timestamp_end)
            .list("ruleIds", &self.rule_ids)
            .list("fields", &self.fields);
        self.paging.apply(params)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActiveAlertsQuery {
    pub device_ids: Vec<i64>,
    pub rule_ids: Vec<i64>,
    pub paging: Paging,
}

impl ActiveAlertsQuery {
    pub fn to_params(&self) -> QueryParams {
        let params = QueryParams::new()
            .list("deviceIds", &self.device_ids)
            .list("ruleIds", &self.rule_ids);
        self.paging.apply(params)
    }
}

impl BreezeClient {
    /// Historical status events.
    ///
    /// `GET status.json`
    pub fn status_events(&self, query: &StatusEventsQuery) -> Result<serde_json::Value, Error> {
        debug!(devices = query.device_ids.len(), "fetching status events");
        self.call("status", &query.to_params())
    }

    /// Currently active status events.
    ///
    /// `GET activestatus.json`
    pub fn active_status_events(
        &self,
        query: &ActiveStatusQuery,
    ) -> Result<serde_json::Value, Error> {
        debug!(devices = query.device_ids.len(), "fetching active status events");
        self.call("activestatus", &query.to_params())
    }

    /// Historical alerts.
    ///
    /// `GET alerts.json`
    pub fn alerts(&self, query: &AlertsQuery) -> Result<serde_json::Value, Error> {
        debug!(devices = query.device_ids.len(), "fetching alerts");
        self.call("alerts", &query.to_params())
    }

    /// Currently active alerts.
    ///
    /// `GET activealerts.json`
    pub fn active_alerts(&self, query: &ActiveAlertsQuery) -> Result<serde_json::Value, Error> {
        debug!(devices = query.device_ids.len(), "fetching active alerts");
        self.call("activealerts", &query.to_params())
    }
}
