//! Recently computed local scores.

use std::collections::{BTreeSet, HashMap, VecDeque};

use pgm_types::VertexId;

/// Default number of parent sets remembered per child.
pub const DEFAULT_CACHE_SIZE: usize = 10;

/// Local scores keyed by child vertex and *set* of parent vertices.
///
/// Each child keeps its entries newest first; once more than `capacity`
/// are stored the oldest is evicted. Lookups do not reorder entries.
#[derive(Clone, Debug)]
pub struct ScoreCache {
    capacity: usize,
    entries: HashMap<VertexId, VecDeque<(BTreeSet<VertexId>, f64)>>,
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl ScoreCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the per-child capacity, evicting the oldest entries if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        for list in self.entries.values_mut() {
            list.truncate(capacity);
        }
    }

    pub fn get(&self, child: VertexId, parents: &BTreeSet<VertexId>) -> Option<f64> {
        self.entries
            .get(&child)?
            .iter()
            .find(|(set, _)| set == parents)
            .map(|&(_, score)| score)
    }

    pub fn insert(&mut self, child: VertexId, parents: BTreeSet<VertexId>, score: f64) {
        let list = self.entries.entry(child).or_default();
        list.push_front((parents, score));
        list.truncate(self.capacity);
    }

    /// Total number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
