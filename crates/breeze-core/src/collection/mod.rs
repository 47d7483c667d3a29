// ── Entity collections ──
//
// `EntityList<T>` is an ordered, duplicate-free list of shared entities with
// an id index. Sites and devices get their own `impl` blocks on top of the
// generic one; the batched signal fetch lives in `fetch`.

mod device_list;
mod fetch;
mod selector;
mod site_list;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

pub use fetch::SignalSource;
pub use selector::{DeviceSelector, Selector, SiteSelector};

use crate::error::CoreError;
use crate::model::{Device, Entity, Site};

pub type SiteList = EntityList<Site>;
pub type DeviceList = EntityList<Device>;

/// Ordered, duplicate-free list of shared entities.
///
/// Members are always sorted (by title, then id). The id index is kept in
/// lockstep with the list: every member is indexed and every indexed
/// entity is a member.
#[derive(Debug)]
pub struct EntityList<T> {
    members: Vec<Rc<T>>,
    index: HashMap<i64, Rc<T>>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Clone for EntityList<T> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T: Entity + Ord> EntityList<T> {
    /// Build from any number of entities, in any order.
    pub fn new<I: IntoIterator<Item = Rc<T>>>(members: I) -> Self {
        let mut sorted: Vec<Rc<T>> = members.into_iter().collect();
        sorted.sort();
        sorted.dedup();

        let kind = T::KIND;
        let mut list = Self::default();
        for member in sorted {
            if list.index.contains_key(&member.id()) {
                warn!(
                    %kind,
                    id = member.id(),
                    title = member.title(),
                    "duplicate id with a different title, dropping"
                );
                continue;
            }
            list.index.insert(member.id(), Rc::clone(&member));
            list.members.push(member);
        }
        list
    }

    pub fn single(member: Rc<T>) -> Self {
        Self::new([member])
    }

    /// Insert in sorted position. Returns `false` if the entity (or another
    /// entity with the same id) is already present.
    pub(crate) fn insert(&mut self, member: Rc<T>) -> bool {
        if self.index.contains_key(&member.id()) {
            return false;
        }
        let pos = self
            .members
            .binary_search(&member)
            .unwrap_or_else(|pos| pos);
        self.index.insert(member.id(), Rc::clone(&member));
        self.members.insert(pos, member);
        true
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rc<T>> {
        self.members.iter()
    }

    pub fn first(&self) -> Option<&Rc<T>> {
        self.members.first()
    }

    /// Member ids, sorted. Not deduplicated.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.members.iter().map(|m| m.id()).collect();
        ids.sort_unstable();
        ids
    }

    /// Member titles, sorted. Not deduplicated.
    pub fn titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.members.iter().map(|m| m.title().to_owned()).collect();
        titles.sort();
        titles
    }

    pub fn get(&self, id: i64) -> Result<Rc<T>, CoreError> {
        self.find(id).ok_or_else(|| CoreError::NotFound {
            entity_type: T::KIND.to_string(),
            identifier: id.to_string(),
        })
    }

    pub fn find(&self, id: i64) -> Option<Rc<T>> {
        self.index.get(&id).cloned()
    }

    pub fn contains(&self, member: &T) -> bool {
        self.index.get(&member.id()).is_some_and(|m| **m == *member)
    }

    /// Members whose title is in `names`.
    pub fn filter_titles<N: AsRef<str>>(&self, names: &[N]) -> Self {
        self.filtered(|m| names.iter().any(|n| n.as_ref() == m.title()))
    }

    /// Members that are also in `others`.
    pub fn filter_members(&self, others: &[Rc<T>]) -> Self {
        self.filtered(|m| others.iter().any(|o| **o == *m))
    }

    /// Resolve a selector against this list.
    pub fn select(&self, selector: &Selector<T>) -> Self {
        match selector {
            Selector::All => self.clone(),
            Selector::ByNames(names) => self.filter_titles(names),
            Selector::BySingle(member) if self.contains(member) => {
                Self::single(Rc::clone(member))
            }
            Selector::BySingle(_) => Self::default(),
        }
    }

    fn filtered(&self, keep: impl Fn(&T) -> bool) -> Self {
        let mut out = Self::default();
        for member in self.members.iter().filter(|m| keep(m)) {
            out.index.insert(member.id(), Rc::clone(member));
            out.members.push(Rc::clone(member));
        }
        out
    }
}

impl<'a, T> IntoIterator for &'a EntityList<T> {
    type Item = &'a Rc<T>;
    type IntoIter = std::slice::Iter<'a, Rc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: fmt::Display> fmt::Display for EntityList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{member}'")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{DeviceKind, Location};

    fn device(title: &str, id: i64) -> Rc<Device> {
        Rc::new(Device::new(
            title,
            id,
            "Hilltop",
            DeviceKind::Turbine,
            Location::new(0.0, 0.0),
        ))
    }

    #[test]
    fn construction_sorts_by_title_regardless_of_input_order() {
        let a = DeviceList::new([device("C", 3), device("A", 1), device("B", 2)]);
        let b = DeviceList::new([device("B", 2), device("C", 3), device("A", 1)]);
        assert_eq!(a.titles(), vec!["A", "B", "C"]);
        let order_a: Vec<_> = a.iter().map(|d| d.title().to_owned()).collect();
        let order_b: Vec<_> = b.iter().map(|d| d.title().to_owned()).collect();
        assert_eq!(order_a, vec!["A", "B", "C"]);
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn construction_drops_duplicates() {
        let list = DeviceList::new([device("A", 1), device("A", 1), device("B", 2)]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn index_agrees_with_members() {
        let list = DeviceList::new([device("B", 20), device("A", 10)]);
        for member in &list {
            assert_eq!(list.get(member.id()).unwrap(), *member);
        }
        assert_eq!(list.ids(), vec![10, 20]);
    }

    #[test]
    fn get_missing_id_is_not_found() {
        let list = DeviceList::new([device("A", 1)]);
        let err = list.get(99).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn ids_and_titles_keep_duplicate_values() {
        // Same title, different ids: both kept, titles repeat.
        let list = DeviceList::new([device("Twin", 2), device("Twin", 1)]);
        assert_eq!(list.titles(), vec!["Twin", "Twin"]);
        assert_eq!(list.ids(), vec![1, 2]);
    }

    #[test]
    fn insert_keeps_order_and_rejects_duplicates() {
        let mut list = DeviceList::new([device("A", 1), device("C", 3)]);
        assert!(list.insert(device("B", 2)));
        assert!(!list.insert(device("B", 2)));
        assert_eq!(list.titles(), vec!["A", "B", "C"]);
        assert!(list.find(2).is_some());
    }

    #[test]
    fn filters_return_same_kind() {
        let list = DeviceList::new([device("A", 1), device("B", 2), device("C", 3)]);

        let by_name = list.filter_titles(&["C", "A", "missing"]);
        assert_eq!(by_name.titles(), vec!["A", "C"]);

        let b = list.get(2).unwrap();
        let by_member = list.filter_members(&[b]);
        assert_eq!(by_member.ids(), vec![2]);
    }

    #[test]
    fn select_single_requires_membership() {
        let list = DeviceList::new([device("A", 1)]);
        let member = list.get(1).unwrap();
        assert_eq!(list.select(&Selector::BySingle(member)).len(), 1);
        assert!(list.select(&Selector::BySingle(device("Z", 9))).is_empty());
        assert_eq!(list.select(&Selector::All).len(), 1);
        assert_eq!(list.select(&Selector::from("A")).len(), 1);
    }

    #[test]
    fn display_lists_members() {
        let list = DeviceList::new([device("B", 2), device("A", 1)]);
        assert_eq!(list.to_string(), "['A: 1', 'B: 2']");
    }
}
