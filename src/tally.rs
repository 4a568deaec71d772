use ahash::RandomState;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

use crate::classify::AggregationKey;
use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateEntry {
    pub key: AggregationKey,
    /// First record seen for `key`.
    pub representative: Record,
    pub count: i64,
}

impl AggregateEntry {
    fn new(key: AggregationKey, representative: Record, count: i64) -> Self {
        Self { key, representative, count }
    }

    fn update(&mut self, delta: i64) {
        self.count += delta;
    }

    fn merge(&mut self, other: &Self) {
        self.count += other.count;
    }
}

/// A keyed multiset of running counts.
///
/// Every implementation keeps at most one entry per key and never replaces
/// the representative once the key exists.
pub trait Tally: Default {
    fn ingest(&mut self, key: AggregationKey, delta: i64, representative: &Record);

    /// Folds in an already aggregated entry.
    fn absorb(&mut self, entry: AggregateEntry);

    fn entries(&self) -> std::slice::Iter<'_, AggregateEntry>;

    fn into_entries(self) -> Vec<AggregateEntry>;

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absorbs `later` into `self`; `self` must hold the earlier input.
    fn merge(&mut self, later: Self) {
        later
            .into_entries()
            .into_iter()
            .for_each(| entry | self.absorb(entry));
    }
}

/// Linear scan over a vector. Fine for the few hundred keys real route data has.
#[derive(Debug, Default)]
pub struct ScanTally {
    entries: Vec<AggregateEntry>,
}

impl Tally for ScanTally {
    fn ingest(&mut self, key: AggregationKey, delta: i64, representative: &Record) {
        match self.entries.iter_mut().find(| entry | entry.key == key) {
            Some(entry) => entry.update(delta),
            None => self.entries.push(AggregateEntry::new(key, representative.clone(), delta)),
        }
    }

    fn absorb(&mut self, other: AggregateEntry) {
        match self.entries.iter_mut().find(| entry | entry.key == other.key) {
            Some(entry) => entry.merge(&other),
            None => self.entries.push(other),
        }
    }

    fn entries(&self) -> std::slice::Iter<'_, AggregateEntry> {
        self.entries.iter()
    }

    fn into_entries(self) -> Vec<AggregateEntry> {
        self.entries
    }
}

/// Hash index from key to slot in an insertion-ordered vector.
#[derive(Debug, Default)]
pub struct HashTally {
    slots: HashMap<AggregationKey, usize, RandomState>,
    entries: Vec<AggregateEntry>,
}

impl Tally for HashTally {
    fn ingest(&mut self, key: AggregationKey, delta: i64, representative: &Record) {
        match self.slots.entry(key) {
            Entry::Occupied(slot) => self.entries[*slot.get()].update(delta),
            Entry::Vacant(slot) => {
                let entry = AggregateEntry::new(slot.key().clone(), representative.clone(), delta);
                slot.insert(self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    fn absorb(&mut self, other: AggregateEntry) {
        match self.slots.get(&other.key) {
            Some(&slot) => self.entries[slot].merge(&other),
            None => {
                self.slots.insert(other.key.clone(), self.entries.len());
                self.entries.push(other);
            }
        }
    }

    fn entries(&self) -> std::slice::Iter<'_, AggregateEntry> {
        self.entries.iter()
    }

    fn into_entries(self) -> Vec<AggregateEntry> {
        self.entries
    }
}
