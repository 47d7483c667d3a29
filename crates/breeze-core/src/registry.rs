// Signal registry: display name -> vendor signal id.
//
// Built once from `datasignals.json` when the API root is constructed and
// read-only afterwards.

use std::collections::BTreeMap;

use breeze_api::DataSignalRecord;

use crate::error::CoreError;

#[derive(Debug, Clone, Default)]
pub struct SignalRegistry {
    by_name: BTreeMap<String, i64>,
}

impl SignalRegistry {
    /// Build from signal definitions. On duplicate titles the first
    /// definition is kept.
    pub fn from_records(records: &[DataSignalRecord]) -> Self {
        let mut by_name = BTreeMap::new();
        for rec in records {
            by_name
                .entry(rec.title.clone())
                .or_insert(rec.data_signal_id);
        }
        Self { by_name }
    }

    pub fn resolve(&self, name: &str) -> Result<i64, CoreError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::UnknownSignal { name: name.into() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Signal names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<(String, i64)> for SignalRegistry {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut by_name = BTreeMap::new();
        for (name, id) in iter {
            by_name.entry(name).or_insert(id);
        }
        Self { by_name }
    }
}
