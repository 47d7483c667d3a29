// ── Signals ──
//
// A `Signal` is one fetched series owned by one entity. Building one is
// what marks its (name, owner) fingerprint as fetched, so signals are only
// ever constructed from data that actually came back from the API.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::entity::EntityKey;
use crate::cache::{DedupCache, Fingerprint};
use crate::series::Series;

#[derive(Debug, Clone)]
pub struct Signal {
    title: String,
    series: Series,
    owner: EntityKey,
}

impl Signal {
    /// Wrap a fetched series and register its fingerprint in `cache`.
    pub fn new(
        title: impl Into<String>,
        series: Series,
        owner: EntityKey,
        cache: &mut DedupCache,
    ) -> Self {
        let title = title.into();
        cache.insert(Fingerprint::new(&title, owner.clone()));
        Self {
            title,
            series,
            owner,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn owner(&self) -> &EntityKey {
        &self.owner
    }

    /// `(owner title, series)`
    pub fn data(&self) -> (&str, &Series) {
        (&self.owner.title, &self.series)
    }
}

impl PartialEq for Signal {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.owner == other.owner
    }
}

impl Eq for Signal {}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {} points",
            self.owner,
            self.title,
            self.series.len()
        )
    }
}

/// Per-entity signal storage, keyed by signal title in insertion order.
///
/// Starts empty. Insertion is first-write-wins: a later signal with an
/// existing title is dropped.
#[derive(Debug, Default)]
pub struct SignalMap {
    inner: RefCell<IndexMap<String, Rc<Signal>>>,
}

impl SignalMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless a signal with the same title exists. Returns whether
    /// the signal was stored.
    pub fn insert(&self, signal: Signal) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.contains_key(signal.title()) {
            return false;
        }
        inner.insert(signal.title().to_owned(), Rc::new(signal));
        true
    }

    pub fn get(&self, title: &str) -> Option<Rc<Signal>> {
        self.inner.borrow().get(title).cloned()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.inner.borrow().contains_key(title)
    }

    pub fn titles(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}
