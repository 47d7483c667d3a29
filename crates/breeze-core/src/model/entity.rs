// ── Entity identity ──
//
// Every node of the asset graph is identified by (title, id). Equality and
// hashing use both; ordering is by title first so collections sort the way
// users read them, with the id as tie-break to stay consistent with `Eq`.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use strum::Display;

use super::signal::{Signal, SignalMap};
use crate::error::CoreError;

/// Which layer of the asset hierarchy an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Site,
    Device,
}

/// Owned, comparable identity of an entity. Used as the owner of a signal
/// and as part of the dedup fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub title: String,
    pub id: i64,
}

impl EntityKey {
    pub fn new(kind: EntityKind, title: impl Into<String>, id: i64) -> Self {
        Self {
            kind,
            title: title.into(),
            id,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.title, self.id)
    }
}

/// Behaviour shared by sites and devices.
pub trait Entity {
    const KIND: EntityKind;

    fn title(&self) -> &str;

    fn id(&self) -> i64;

    /// Signals attached to this entity so far.
    fn signal_map(&self) -> &SignalMap;

    fn key(&self) -> EntityKey {
        EntityKey::new(Self::KIND, self.title(), self.id())
    }

    /// Attach a signal unless one with the same title is already held.
    fn add_signal(&self, signal: Signal) -> bool {
        self.signal_map().insert(signal)
    }

    fn signal(&self, name: &str) -> Option<Rc<Signal>> {
        self.signal_map().get(name)
    }

    /// Already-attached signals, in the order of `names`. Never fetches.
    fn signals<N: AsRef<str>>(&self, names: &[N]) -> Result<Vec<Rc<Signal>>, CoreError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.signal(name).ok_or_else(|| CoreError::SignalNotFetched {
                    signal: name.to_owned(),
                    entity: format!("{} {}", Self::KIND, self.title()),
                })
            })
            .collect()
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Total order (latitude, then longitude) for sorting.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.latitude
            .total_cmp(&other.latitude)
            .then_with(|| self.longitude.total_cmp(&other.longitude))
    }

    /// Arithmetic mean of latitudes and of longitudes. `None` when empty.
    pub fn centroid(points: &[Location]) -> Option<Location> {
        if points.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let n = points.len() as f64;
        let (lat, lon) = points.iter().fold((0.0, 0.0), |(lat, lon), p| {
            (lat + p.latitude, lon + p.longitude)
        });
        Some(Location::new(lat / n, lon / n))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Implements `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord` and `Display`
/// for an entity type from its `title` and `id` fields.
macro_rules! entity_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.title == other.title && self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&self.title, state);
                std::hash::Hash::hash(&self.id, state);
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.title
                    .cmp(&other.title)
                    .then_with(|| self.id.cmp(&other.id))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}: {}", self.title, self.id)
            }
        }
    };
}

pub(crate) use entity_identity;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn centroid_is_mean_of_coordinates() {
        let c = Location::centroid(&[Location::new(10.0, 20.0), Location::new(20.0, 30.0)]).unwrap();
        assert_eq!(c, Location::new(15.0, 25.0));
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert!(Location::centroid(&[]).is_none());
    }

    #[test]
    fn entity_key_orders_by_kind_then_title() {
        let a = EntityKey::new(EntityKind::Site, "Zeta", 1);
        let b = EntityKey::new(EntityKind::Device, "Alpha", 2);
        assert!(a < b);
        assert_eq!(b.to_string(), "device Alpha: 2");
    }
}
