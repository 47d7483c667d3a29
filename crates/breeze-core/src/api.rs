// ── API root ──
//
// `Breeze` owns the client, the signal registry, the dedup cache and the
// site inventory. Construction is eager: the device inventory and signal
// definitions are fetched up front and the site graph is built from them.

use std::cell::{RefCell, RefMut};
use std::collections::BTreeSet;
use std::rc::Rc;

use serde_json::Value;
use strum::Display;
use tracing::{debug, info};

use breeze_api::{
    ActiveAlertsQuery, ActiveStatusQuery, AlertsQuery, BreezeClient, DataQuery, DevicesQuery,
    HttpTransport, PowerCurvesQuery, RealTimeDataQuery, StatusEventsQuery, Transport,
};

use crate::cache::{DedupCache, Fingerprint};
use crate::collection::{DeviceList, SiteList, SiteSelector};
use crate::config::BreezeConfig;
use crate::error::CoreError;
use crate::model::{Device, EntityKey, Site};
use crate::registry::SignalRegistry;
use crate::series::Series;
use crate::window::TimeWindow;

/// How the API groups the entries of a `data` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Aggregate {
    /// One entry per device (the API default).
    Device,
    /// One entry per site, summing its devices.
    Site,
}

impl Aggregate {
    /// Value of the `aggregate` query parameter, if one is sent at all.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::Device => None,
            Self::Site => Some("site"),
        }
    }
}

/// One historical data request over a set of devices.
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    pub device_ids: Vec<i64>,
    pub signal_names: Vec<String>,
    pub aggregate: Aggregate,
    /// Falls back to the root's default window when unset.
    pub window: Option<TimeWindow>,
    pub resolution: Option<String>,
    pub calculation: Option<String>,
}

impl SeriesRequest {
    pub fn new<I, S>(device_ids: Vec<i64>, signal_names: I, aggregate: Aggregate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            device_ids,
            signal_names: signal_names.into_iter().map(Into::into).collect(),
            aggregate,
            window: None,
            resolution: None,
            calculation: None,
        }
    }

    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    pub fn calculation(mut self, calculation: impl Into<String>) -> Self {
        self.calculation = Some(calculation.into());
        self
    }
}

/// One parsed entry of a `data` response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSeries {
    /// Device or site id, depending on the request's aggregate.
    pub aggregate_id: i64,
    /// Signal title as reported by the API.
    pub title: String,
    pub series: Series,
}

/// Entry point to the object model.
pub struct Breeze {
    client: BreezeClient,
    registry: SignalRegistry,
    cache: RefCell<DedupCache>,
    sites: SiteList,
    window: TimeWindow,
}

impl Breeze {
    /// Connect over HTTP and build the inventory.
    pub fn connect(config: &BreezeConfig) -> Result<Self, CoreError> {
        let transport = HttpTransport::new(&config.transport_config()).map_err(|e| {
            CoreError::ConnectionFailed {
                url: config.url.to_string(),
                reason: e.to_string(),
            }
        })?;
        Self::with_transport(Box::new(transport))
    }

    /// Build the inventory over any transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Result<Self, CoreError> {
        Self::from_client(BreezeClient::new(transport))
    }

    pub fn from_client(client: BreezeClient) -> Result<Self, CoreError> {
        let records = client.devices(&DevicesQuery::default())?;
        let definitions = client.data_signals(&[])?;
        let registry = SignalRegistry::from_records(&definitions);

        let site_keys: BTreeSet<(String, i64)> = records
            .iter()
            .map(|r| (r.site.title.clone(), r.site.site_id))
            .collect();
        let sites = SiteList::new(
            site_keys
                .into_iter()
                .map(|(title, id)| Rc::new(Site::new(title, id))),
        );
        for record in &records {
            sites.add_device(Rc::new(Device::from_record(record)))?;
        }

        info!(
            sites = sites.len(),
            devices = records.len(),
            signals = registry.len(),
            "inventory loaded"
        );

        Ok(Self {
            client,
            registry,
            cache: RefCell::new(DedupCache::new()),
            sites,
            window: TimeWindow::default(),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn client(&self) -> &BreezeClient {
        &self.client
    }

    /// Whether any call has succeeded yet.
    pub fn connected(&self) -> bool {
        self.client.connected()
    }

    /// Every site in the inventory.
    pub fn all_sites(&self) -> &SiteList {
        &self.sites
    }

    /// Sites picked by `selector`. Accepts a name, a list of names, a
    /// site, or `Selector::All`.
    pub fn sites(&self, selector: impl Into<SiteSelector>) -> SiteList {
        self.sites.select(&selector.into())
    }

    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Known signal names, sorted.
    pub fn signal_names(&self) -> Vec<String> {
        self.registry.names().map(str::to_owned).collect()
    }

    // ── Dedup cache ──────────────────────────────────────────────────

    pub fn is_cached(&self, signal: &str, entity: &EntityKey) -> bool {
        self.cache.borrow().contains(signal, entity)
    }

    /// Everything fetched so far, sorted.
    pub fn cached_fingerprints(&self) -> Vec<Fingerprint> {
        self.cache.borrow().fingerprints()
    }

    pub(crate) fn cache_mut(&self) -> RefMut<'_, DedupCache> {
        self.cache.borrow_mut()
    }

    // ── Time window ──────────────────────────────────────────────────

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Replace the default window used by requests that don't set one.
    /// Already-fetched signals are not refetched.
    pub fn set_window(&mut self, window: TimeWindow) {
        debug!(start = %window.start, end = %window.end, "default window changed");
        self.window = window;
    }

    // ── Data ─────────────────────────────────────────────────────────

    /// Issue one `data` call and parse every returned entry.
    ///
    /// Signal names are resolved before any request is made.
    pub fn fetch_series(&self, request: &SeriesRequest) -> Result<Vec<FetchedSeries>, CoreError> {
        let data_signal_ids = request
            .signal_names
            .iter()
            .map(|name| self.registry.resolve(name))
            .collect::<Result<Vec<_>, _>>()?;
        let window = request.window.unwrap_or(self.window);

        let query = DataQuery {
            device_ids: request.device_ids.clone(),
            data_signal_ids,
            timestamp_start: Some(window.start),
            timestamp_end: Some(window.end),
            resolution: request.resolution.clone(),
            aggregate: request.aggregate.as_param().map(str::to_owned),
            calculation: request.calculation.clone(),
        };

        self.client
            .data(&query)?
            .into_iter()
            .map(|entry| {
                Ok(FetchedSeries {
                    aggregate_id: entry.aggregate_id,
                    title: entry.data_signal.title,
                    series: Series::parse(&entry.data)?,
                })
            })
            .collect()
    }

    /// Latest values for the devices.
    pub fn real_time_data<N: AsRef<str>>(
        &self,
        devices: &DeviceList,
        signal_names: &[N],
    ) -> Result<Value, CoreError> {
        let data_signal_ids = signal_names
            .iter()
            .map(|name| self.registry.resolve(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let query = RealTimeDataQuery {
            device_ids: devices.ids(),
            data_signal_ids,
            ..RealTimeDataQuery::default()
        };
        Ok(self.client.real_time_data(&query)?)
    }

    /// Status events for the devices within the default window.
    pub fn status_events(&self, devices: &DeviceList) -> Result<Value, CoreError> {
        let query = StatusEventsQuery {
            device_ids: devices.ids(),
            timestamp_start: Some(self.window.start),
            timestamp_end: Some(self.window.end),
            ..StatusEventsQuery::default()
        };
        Ok(self.client.status_events(&query)?)
    }

    pub fn active_status_events(&self, devices: &DeviceList) -> Result<Value, CoreError> {
        let query = ActiveStatusQuery {
            device_ids: devices.ids(),
            ..ActiveStatusQuery::default()
        };
        Ok(self.client.active_status_events(&query)?)
    }

    /// Alerts for the devices within the default window.
    pub fn alerts(&self, devices: &DeviceList) -> Result<Value, CoreError> {
        let query = AlertsQuery {
            device_ids: devices.ids(),
            timestamp_start: Some(self.window.start),
            timestamp_end: Some(self.window.end),
            ..AlertsQuery::default()
        };
        Ok(self.client.alerts(&query)?)
    }

    pub fn active_alerts(&self, devices: &DeviceList) -> Result<Value, CoreError> {
        let query = ActiveAlertsQuery {
            device_ids: devices.ids(),
            ..ActiveAlertsQuery::default()
        };
        Ok(self.client.active_alerts(&query)?)
    }

    /// Power curves for the devices; `learned` picks learned over
    /// contractual curves.
    pub fn power_curves(&self, devices: &DeviceList, learned: Option<bool>) -> Result<Value, CoreError> {
        let query = PowerCurvesQuery {
            device_ids: devices.ids(),
            timestamp: None,
            learned,
        };
        Ok(self.client.power_curves(&query)?)
    }
}

impl std::fmt::Debug for Breeze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Breeze")
            .field("connected", &self.connected())
            .field("sites", &self.sites.len())
            .field("signals", &self.registry.len())
            .field("cached", &self.cache.borrow().len())
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
