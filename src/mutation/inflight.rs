use std::collections::BTreeSet;

use crate::model::ItemId;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlightKey {
    Item(ItemId),
    /// An add not yet assigned an id, keyed by its dedup key.
    Draft(String),
}

/// Keys with a mutation in flight. At most one mutation per key.
#[derive(Debug, Default)]
pub struct InFlight {
    keys: BTreeSet<FlightKey>,
}

impl InFlight {
    pub fn contains(&self, key: &FlightKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Claims every key or none. On failure returns the first key already held.
    pub fn try_claim(&mut self, keys: &[FlightKey]) -> Result<(), FlightKey> {
        if let Some(busy) = keys.iter().find(|k| self.keys.contains(*k)) {
            return Err(busy.clone());
        }
        self.keys.extend(keys.iter().cloned());
        Ok(())
    }

    pub fn release(&mut self, keys: &[FlightKey]) {
        for k in keys {
            self.keys.remove(k);
        }
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.keys.iter().filter_map(|k| match k {
            FlightKey::Item(id) => Some(*id),
            FlightKey::Draft(_) => None,
        })
    }
}
