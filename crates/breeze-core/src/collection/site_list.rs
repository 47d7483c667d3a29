// ── Site collection ──

use std::rc::Rc;

use super::{DeviceList, DeviceSelector, Selector, SiteList};
use crate::error::CoreError;
use crate::model::{Device, Entity, Location, SiteKind};

impl SiteList {
    /// Route a device to the site whose title matches `device.site()`.
    /// Returns whether the device was newly added.
    pub fn add_device(&self, device: Rc<Device>) -> Result<bool, CoreError> {
        let site = self
            .iter()
            .find(|s| s.title() == device.site())
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "site".into(),
                identifier: device.site().to_owned(),
            })?;
        Ok(site.add_device(device))
    }

    /// Devices under these sites.
    ///
    /// `All` on a single-site list hands back that site's own list; on a
    /// larger list the per-site lists are merged. `ByNames` filters the
    /// merged list by device title. `BySingle` is not supported here and
    /// yields `None`.
    pub fn devices(&self, selector: impl Into<DeviceSelector>) -> Option<DeviceList> {
        match selector.into() {
            Selector::All if self.len() == 1 => self.first().map(|site| site.devices()),
            Selector::All => Some(self.all_devices()),
            Selector::ByNames(names) => Some(self.all_devices().filter_titles(&names)),
            Selector::BySingle(_) => None,
        }
    }

    /// One device list per site, in site order.
    pub fn devices_by_site(&self) -> Vec<DeviceList> {
        self.iter().map(|site| site.devices()).collect()
    }

    /// Distinct site classifications, sorted.
    pub fn types(&self) -> Vec<SiteKind> {
        let mut types: Vec<SiteKind> = self.iter().map(|s| s.site_type()).collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Site centroids, sorted and deduplicated. Fails if any site has no
    /// devices.
    pub fn locations(&self) -> Result<Vec<Location>, CoreError> {
        let mut points = self
            .iter()
            .map(|s| s.location())
            .collect::<Result<Vec<_>, _>>()?;
        points.sort_by(Location::total_cmp);
        points.dedup();
        Ok(points)
    }

    /// Classification of the only site, or `None` for zero or many sites.
    pub fn site_type(&self) -> Option<SiteKind> {
        match self.len() {
            1 => self.first().map(|s| s.site_type()),
            _ => None,
        }
    }

    fn all_devices(&self) -> DeviceList {
        let mut merged = Vec::new();
        for site in self {
            merged.extend(site.devices().iter().cloned());
        }
        DeviceList::new(merged)
    }
}
