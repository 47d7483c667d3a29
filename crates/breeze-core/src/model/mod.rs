// ── Domain model ──
//
// Sites and devices share one identity scheme (title + numeric id) and
// each carries its own signal map.

mod device;
mod entity;
mod signal;
mod site;

pub use device::{Device, DeviceKind};
pub use entity::{Entity, EntityKey, EntityKind, Location};
pub use signal::{Signal, SignalMap};
pub use site::{Site, SiteKind};
