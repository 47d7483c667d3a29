// Breeze API response types
//
// Only the endpoints the object model walks (devices, datasignals, data)
// are typed. Fields use `#[serde(default)]` where tenants are known to
// omit them; everything unmodelled lands in `extra`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// ── Devices ──────────────────────────────────────────────────────────

/// Owning site as embedded in a device record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRef {
    pub site_id: i64,
    pub title: String,
}

/// One entry of `devices.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub device_id: i64,
    pub title: String,
    /// Vendor device type, e.g. `"turbine"`, `"inverter"`, `"met mast"`.
    #[serde(default)]
    pub device_type: String,
    pub site: SiteRef,
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: f64,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Signals ──────────────────────────────────────────────────────────

/// One entry of `datasignals.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSignalRecord {
    pub data_signal_id: i64,
    pub title: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Signal reference embedded in a data entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSignalRef {
    pub data_signal_id: i64,
    pub title: String,
}

// ── Time series ──────────────────────────────────────────────────────

/// One entry of `data.json`: a series for one aggregate (site or device).
///
/// `data` maps timestamp strings to values; the timestamps are kept raw
/// here and parsed by the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEntry {
    pub aggregate_id: i64,
    pub data_signal: DataSignalRef,
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Coordinates arrive either as JSON numbers or as numeric strings.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
