// ── Dedup cache ──
//
// Process-lifetime record of which (signal, entity) pairs have already been
// fetched. Grows monotonically: no eviction, no TTL. Owned by the API root
// and consulted by collections before they batch a request.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::EntityKey;

/// Dedup key: a signal name paired with the entity it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Fingerprint {
    pub signal: String,
    pub entity: EntityKey,
}

impl Fingerprint {
    pub fn new(signal: &str, entity: EntityKey) -> Self {
        Self {
            signal: signal.to_owned(),
            entity,
        }
    }
}

#[derive(Debug, Default)]
pub struct DedupCache {
    seen: HashSet<Fingerprint>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, signal: &str, entity: &EntityKey) -> bool {
        // HashSet lookup needs an owned key; fingerprints are small.
        self.seen.contains(&Fingerprint::new(signal, entity.clone()))
    }

    /// Only `Signal::new` records fingerprints.
    pub(crate) fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.seen.insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// All fingerprints, sorted.
    pub fn fingerprints(&self) -> Vec<Fingerprint> {
        let mut all: Vec<_> = self.seen.iter().cloned().collect();
        all.sort();
        all
    }
}
