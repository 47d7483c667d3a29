// ── Batched signal fetch ──
//
// For each requested signal name, the members of a collection that have not
// fetched it yet are grouped into one batch and fetched with a single
// `data` call. Responses are routed back to members by aggregate id.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use super::EntityList;
use crate::api::{Aggregate, Breeze, SeriesRequest};
use crate::error::CoreError;
use crate::model::{Device, Entity, Signal, Site};

/// An entity that can be the unit of a batched data request.
pub trait SignalSource: Entity + Ord {
    /// How the API should group entries for this kind of member.
    const AGGREGATE: Aggregate;

    /// Device ids to request on behalf of this member.
    fn batch_ids(&self) -> Vec<i64>;
}

impl SignalSource for Site {
    const AGGREGATE: Aggregate = Aggregate::Site;

    fn batch_ids(&self) -> Vec<i64> {
        self.device_ids()
    }
}

impl SignalSource for Device {
    const AGGREGATE: Aggregate = Aggregate::Device;

    fn batch_ids(&self) -> Vec<i64> {
        vec![self.id()]
    }
}

impl<T: SignalSource> EntityList<T> {
    /// Signals `names` for every member, fetching only what is not cached.
    ///
    /// Results come back member-major: all requested names for the first
    /// member, then the second, and so on.
    pub fn signals<N: AsRef<str>>(
        &self,
        api: &Breeze,
        names: &[N],
    ) -> Result<Vec<Rc<Signal>>, CoreError> {
        let names = unique_names(names);
        // Fail on unknown names before touching the network.
        for name in &names {
            api.registry().resolve(name)?;
        }

        for (name, batch) in self.pending(api, &names) {
            self.fetch_batch(api, name, &batch)?;
        }

        let mut out = Vec::with_capacity(self.len() * names.len());
        for member in self {
            out.extend(member.signals(&names)?);
        }
        Ok(out)
    }

    /// Single-name form of [`signals`](Self::signals).
    pub fn signal(&self, api: &Breeze, name: &str) -> Result<Vec<Rc<Signal>>, CoreError> {
        self.signals(api, &[name])
    }

    /// Members still missing each name, grouped per name in request order.
    fn pending<'n>(&self, api: &Breeze, names: &'n [String]) -> IndexMap<&'n str, Vec<Rc<T>>> {
        let mut batches: IndexMap<&str, Vec<Rc<T>>> = IndexMap::new();
        for name in names {
            for member in self {
                if api.is_cached(name, &member.key()) {
                    trace!(signal = %name, entity = %member.key(), "cache hit");
                    continue;
                }
                batches
                    .entry(name.as_str())
                    .or_default()
                    .push(Rc::clone(member));
            }
        }
        batches
    }

    fn fetch_batch(&self, api: &Breeze, name: &str, batch: &[Rc<T>]) -> Result<(), CoreError> {
        let device_ids: Vec<i64> = batch.iter().flat_map(|m| m.batch_ids()).collect();
        if device_ids.is_empty() {
            debug!(signal = name, members = batch.len(), "batch has no devices, skipping");
            return Ok(());
        }
        let aggregate = T::AGGREGATE;
        debug!(
            signal = name,
            members = batch.len(),
            devices = device_ids.len(),
            %aggregate,
            "fetching batch"
        );

        let request = SeriesRequest::new(device_ids, [name], aggregate);
        let fetched = api.fetch_series(&request)?;

        let mut cache = api.cache_mut();
        for entry in fetched {
            let Some(member) = self.find(entry.aggregate_id) else {
                warn!(
                    signal = name,
                    aggregate_id = entry.aggregate_id,
                    "aggregate id is not a member of this collection, skipping"
                );
                continue;
            };
            let signal = Signal::new(name, entry.series, member.key(), &mut cache);
            member.add_signal(signal);
        }
        Ok(())
    }
}

fn unique_names<N: AsRef<str>>(names: &[N]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if !out.iter().any(|n| n == name) {
            out.push(name.to_owned());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_keeps_first_occurrence_order() {
        assert_eq!(
            unique_names(&["Power", "Wind", "Power"]),
            vec!["Power".to_owned(), "Wind".to_owned()]
        );
    }
}
