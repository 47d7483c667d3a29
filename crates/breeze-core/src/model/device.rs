// ── Device domain type ──

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use breeze_api::DeviceRecord;

use super::entity::{Entity, EntityKind, Location, entity_identity};
use super::signal::SignalMap;

/// Vendor device type. Only turbines and inverters drive site
/// classification; everything else keeps its raw name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum DeviceKind {
    Turbine,
    Inverter,
    Other(String),
}

impl DeviceKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Turbine => "turbine",
            Self::Inverter => "inverter",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for DeviceKind {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "turbine" => Self::Turbine,
            "inverter" => Self::Inverter,
            _ => Self::Other(raw.to_owned()),
        }
    }
}

impl From<DeviceKind> for String {
    fn from(kind: DeviceKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl PartialOrd for DeviceKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Sorted by name, the way the API reports them.
impl Ord for DeviceKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monitored asset. Identity and metadata are fixed at construction;
/// only the signal map changes afterwards.
#[derive(Debug)]
pub struct Device {
    title: String,
    id: i64,
    site: String,
    kind: DeviceKind,
    location: Location,
    signals: SignalMap,
}

entity_identity!(Device);

impl Device {
    pub fn new(
        title: impl Into<String>,
        id: i64,
        site: impl Into<String>,
        kind: DeviceKind,
        location: Location,
    ) -> Self {
        Self {
            title: title.into(),
            id,
            site: site.into(),
            kind,
            location,
            signals: SignalMap::new(),
        }
    }

    pub fn from_record(record: &DeviceRecord) -> Self {
        Self::new(
            record.title.clone(),
            record.device_id,
            record.site.title.clone(),
            DeviceKind::from(record.device_type.as_str()),
            Location::new(record.latitude, record.longitude),
        )
    }

    /// Title of the owning site.
    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

impl Entity for Device {
    const KIND: EntityKind = EntityKind::Device;

    fn title(&self) -> &str {
        &self.title
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn signal_map(&self) -> &SignalMap {
        &self.signals
    }
}
