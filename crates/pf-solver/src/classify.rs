//! Known/unknown bookkeeping for one category of scalar quantity.

/// Ordered partition of ids into known and unknown.
///
/// Every id is in exactly one of the two lists. Both lists keep insertion
/// order, which fixes the order of slots in the unknown vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<K> {
    known: Vec<K>,
    unknown: Vec<K>,
}

impl<K> Default for Classification<K> {
    fn default() -> Self {
        Self {
            known: Vec::new(),
            unknown: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> Classification<K> {
    /// Classification with every id unknown.
    pub fn all_unknown(ids: impl IntoIterator<Item = K>) -> Self {
        Self {
            known: Vec::new(),
            unknown: ids.into_iter().collect(),
        }
    }

    /// Register a new id as unknown. No-op if the id is already tracked.
    pub fn insert_unknown(&mut self, id: K) {
        if !self.contains(id) {
            self.unknown.push(id);
        }
    }

    /// Move `id` to the known list. Idempotent.
    pub fn mark_known(&mut self, id: K) {
        if let Some(pos) = self.unknown.iter().position(|&k| k == id) {
            self.unknown.remove(pos);
        }
        if !self.known.contains(&id) {
            self.known.push(id);
        }
    }

    pub fn is_known(&self, id: K) -> bool {
        self.known.contains(&id)
    }

    pub fn is_unknown(&self, id: K) -> bool {
        self.unknown.contains(&id)
    }

    pub fn contains(&self, id: K) -> bool {
        self.is_known(id) || self.is_unknown(id)
    }

    pub fn known(&self) -> &[K] {
        &self.known
    }

    pub fn unknown(&self) -> &[K] {
        &self.unknown
    }
}
