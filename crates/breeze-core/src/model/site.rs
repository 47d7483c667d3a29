// ── Site domain type ──

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use strum::Display;

use super::device::{Device, DeviceKind};
use super::entity::{Entity, EntityKind, Location, entity_identity};
use super::signal::SignalMap;
use crate::collection::DeviceList;
use crate::error::CoreError;

/// Site classification derived from the devices it owns.
///
/// Variant order matches the sort order of the display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display)]
pub enum SiteKind {
    #[strum(serialize = "")]
    #[serde(rename = "")]
    Unknown,
    Solar,
    Wind,
}

/// A park: a named group of devices with its own site-level signals.
#[derive(Debug)]
pub struct Site {
    title: String,
    id: i64,
    devices: RefCell<DeviceList>,
    signals: SignalMap,
}

entity_identity!(Site);

impl Site {
    pub fn new(title: impl Into<String>, id: i64) -> Self {
        Self {
            title: title.into(),
            id,
            devices: RefCell::new(DeviceList::default()),
            signals: SignalMap::new(),
        }
    }

    /// Snapshot of the owned devices (shares the device objects).
    pub fn devices(&self) -> DeviceList {
        self.devices.borrow().clone()
    }

    pub fn device_count(&self) -> usize {
        self.devices.borrow().len()
    }

    /// Ids of the owned devices, sorted.
    pub fn device_ids(&self) -> Vec<i64> {
        self.devices.borrow().ids()
    }

    /// Add a device unless an equal one is already owned. Returns whether
    /// it was added.
    pub fn add_device(&self, device: Rc<Device>) -> bool {
        self.devices.borrow_mut().insert(device)
    }

    /// Centroid of the owned devices' locations.
    pub fn location(&self) -> Result<Location, CoreError> {
        let points: Vec<Location> = self
            .devices
            .borrow()
            .iter()
            .map(|d| d.location())
            .collect();
        Location::centroid(&points).ok_or_else(|| CoreError::EmptyEntityState {
            entity: format!("site {self}"),
        })
    }

    /// Classified by the first turbine or inverter in device order (sorted
    /// by title): `Wind` for a turbine, `Solar` for an inverter, `Unknown`
    /// when the site owns neither. A mixed site takes the type of whichever
    /// sorts first.
    pub fn site_type(&self) -> SiteKind {
        self.devices
            .borrow()
            .iter()
            .find_map(|d| match d.kind() {
                DeviceKind::Turbine => Some(SiteKind::Wind),
                DeviceKind::Inverter => Some(SiteKind::Solar),
                DeviceKind::Other(_) => None,
            })
            .unwrap_or(SiteKind::Unknown)
    }
}

impl Entity for Site {
    const KIND: EntityKind = EntityKind::Site;

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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cache::DedupCache;
    use crate::model::Signal;
    use crate::series::Series;

    fn device(title: &str, id: i64, kind: DeviceKind, lat: f64, lon: f64) -> Rc<Device> {
        Rc::new(Device::new(title, id, "Hilltop", kind, Location::new(lat, lon)))
    }

    #[test]
    fn location_is_centroid_of_devices() {
        let site = Site::new("Hilltop", 1);
        site.add_device(device("A", 11, DeviceKind::Turbine, 10.0, 20.0));
        site.add_device(device("B", 12, DeviceKind::Turbine, 20.0, 30.0));
        assert_eq!(site.location().unwrap(), Location::new(15.0, 25.0));
    }

    #[test]
    fn location_without_devices_is_empty_state() {
        let site = Site::new("Empty", 9);
        let err = site.location().unwrap_err();
        assert!(matches!(err, CoreError::EmptyEntityState { .. }));
    }

    #[test]
    fn mixed_site_with_turbine_first_is_wind() {
        let site = Site::new("Hybrid", 3);
        site.add_device(device("Inverter 1", 31, DeviceKind::Inverter, 0.0, 0.0));
        site.add_device(device("A-turb", 32, DeviceKind::Turbine, 0.0, 0.0));
        assert_eq!(site.site_type(), SiteKind::Wind);
    }

    #[test]
    fn mixed_site_takes_first_device_in_title_order() {
        let site = Site::new("Hybrid", 3);
        // Insertion order is irrelevant; devices are kept sorted by title.
        site.add_device(device("B-turb", 32, DeviceKind::Turbine, 0.0, 0.0));
        site.add_device(device("A-inv", 31, DeviceKind::Inverter, 0.0, 0.0));
        assert_eq!(site.site_type(), SiteKind::Solar);
    }

    #[test]
    fn other_devices_are_skipped_when_classifying() {
        let site = Site::new("Hybrid", 3);
        site.add_device(device("A-mast", 30, DeviceKind::Other("met mast".into()), 0.0, 0.0));
        site.add_device(device("B-inv", 31, DeviceKind::Inverter, 0.0, 0.0));
        site.add_device(device("C-turb", 32, DeviceKind::Turbine, 0.0, 0.0));
        assert_eq!(site.site_type(), SiteKind::Solar);
    }

    #[test]
    fn site_type_variants() {
        let solar = Site::new("Sunny", 4);
        solar.add_device(device("INV", 41, DeviceKind::Inverter, 0.0, 0.0));
        assert_eq!(solar.site_type(), SiteKind::Solar);

        let other = Site::new("Mast", 5);
        other.add_device(device("MM", 51, DeviceKind::Other("met mast".into()), 0.0, 0.0));
        assert_eq!(other.site_type(), SiteKind::Unknown);
        assert_eq!(other.site_type().to_string(), "");

        assert_eq!(Site::new("Bare", 6).site_type(), SiteKind::Unknown);
    }

    #[test]
    fn add_device_skips_duplicates() {
        let site = Site::new("Hilltop", 1);
        assert!(site.add_device(device("A", 11, DeviceKind::Turbine, 0.0, 0.0)));
        assert!(!site.add_device(device("A", 11, DeviceKind::Turbine, 0.0, 0.0)));
        assert_eq!(site.device_count(), 1);
    }

    #[test]
    fn add_signal_is_first_write_wins() {
        let mut cache = DedupCache::new();
        let site = Site::new("Hilltop", 1);
        let first = Signal::new(
            "Power",
            Series::from_points([(crate::series::tests::ts(0), Some(5.0))]),
            site.key(),
            &mut cache,
        );
        let later = Signal::new("Power", Series::default(), site.key(), &mut cache);
        assert!(site.add_signal(first));
        assert!(!site.add_signal(later));
        assert_eq!(site.signal("Power").unwrap().series().len(), 1);
    }
}
