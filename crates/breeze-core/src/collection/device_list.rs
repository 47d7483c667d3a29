// ── Device collection ──

use super::DeviceList;
use crate::model::{DeviceKind, Location};

impl DeviceList {
    /// Distinct device types, sorted.
    pub fn types(&self) -> Vec<DeviceKind> {
        let mut types: Vec<DeviceKind> = self.iter().map(|d| d.kind().clone()).collect();
        types.sort();
        types.dedup();
        types
    }

    /// Distinct device locations, sorted.
    pub fn locations(&self) -> Vec<Location> {
        let mut points: Vec<Location> = self.iter().map(|d| d.location()).collect();
        points.sort_by(Location::total_cmp);
        points.dedup();
        points
    }

    /// Titles of the owning sites, sorted and deduplicated.
    pub fn site_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.iter().map(|d| d.site().to_owned()).collect();
        titles.sort();
        titles.dedup();
        titles
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::model::Device;

    fn device(title: &str, id: i64, kind: DeviceKind, lat: f64) -> Rc<Device> {
        Rc::new(Device::new(title, id, "Mixed", kind, Location::new(lat, 1.0)))
    }

    #[test]
    fn types_and_locations_are_deduplicated() {
        let list = DeviceList::new([
            device("B", 2, DeviceKind::Turbine, 5.0),
            device("A", 1, DeviceKind::Turbine, 5.0),
            device("C", 3, DeviceKind::Inverter, 3.0),
        ]);
        assert_eq!(list.types(), vec![DeviceKind::Inverter, DeviceKind::Turbine]);
        assert_eq!(
            list.locations(),
            vec![Location::new(3.0, 1.0), Location::new(5.0, 1.0)]
        );
        // ids and titles are not deduplicated, types and locations are.
        assert_eq!(list.ids().len(), 3);
        assert_eq!(list.site_titles(), vec!["Mixed"]);
    }
}
