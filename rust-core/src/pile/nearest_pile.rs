use serde::Serialize;

use crate::error::FieldError;

/// A retained (rank, payload) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PileEntry<T> {
    pub rank: f64,
    pub value: T,
}

/// Fixed-capacity store of the entries with the smallest ranks.
///
/// Entries are kept in ascending rank order. Equal ranks keep their insertion
/// order, so the entry inserted first survives when the pile overflows.
/// Slots that were never filled are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pile<T> {
    capacity: usize,
    entries: Vec<PileEntry<T>>,
}

impl<T> Pile<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Like [`Pile::new`] but returns an error instead of aborting when the
    /// backing storage cannot be reserved.
    pub fn try_new(capacity: usize) -> Result<Self, FieldError> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|source| FieldError::Allocation {
                what: "contact neighbour pile",
                source,
            })?;
        Ok(Self { capacity, entries })
    }

    /// Insert `value` with `rank`.
    ///
    /// The entry lands in front of the first retained entry with a strictly
    /// larger rank. When the pile is full the last entry is dropped; an entry
    /// ranked after every retained one is ignored.
    pub fn insert(&mut self, rank: f64, value: T) {
        let slot = self
            .entries
            .iter()
            .position(|entry| entry.rank > rank)
            .unwrap_or(self.entries.len());
        if slot >= self.capacity {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop();
        }
        self.entries.insert(slot, PileEntry { rank, value });
    }

    /// Insert all entries of `other` after the ones already retained.
    ///
    /// Merging the pile of an earlier partition of a scan with a later one
    /// gives the same result as inserting sequentially.
    pub fn merge(&mut self, other: Pile<T>) {
        for entry in other.entries {
            self.insert(entry.rank, entry.value);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    pub fn get(&self, slot: usize) -> Option<&PileEntry<T>> {
        self.entries.get(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PileEntry<T>> {
        self.entries.iter()
    }

    pub fn ranks(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|entry| entry.rank)
    }
}

impl<'a, T> IntoIterator for &'a Pile<T> {
    type Item = &'a PileEntry<T>;
    type IntoIter = std::slice::Iter<'a, PileEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
