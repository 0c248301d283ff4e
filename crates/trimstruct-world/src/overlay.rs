use std::collections::HashMap;

use trimstruct_core::{FlatIndex, Map};

/// Sparse per-cell extra data keyed by flattened index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    entries: HashMap<FlatIndex, Map>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: FlatIndex) -> Option<&Map> {
        self.entries.get(&index)
    }

    pub fn insert(&mut self, index: FlatIndex, extra: Map) -> Option<Map> {
        self.entries.insert(index, extra)
    }

    pub fn remove(&mut self, index: FlatIndex) -> Option<Map> {
        self.entries.remove(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, index: FlatIndex) -> bool {
        self.entries.contains_key(&index)
    }

    /// Entries in ascending index order.
    pub fn sorted(&self) -> Vec<(FlatIndex, &Map)> {
        let mut out: Vec<_> = self.entries.iter().map(|(&k, v)| (k, v)).collect();
        out.sort_unstable_by_key(|(k, _)| *k);
        out
    }

    /// Move every entry to `f(index)`. `f` must be a bijection on the keys.
    pub fn remap(&mut self, f: impl Fn(FlatIndex) -> FlatIndex) {
        self.entries = self
            .entries
            .drain()
            .map(|(index, extra)| (f(index), extra))
            .collect();
    }
}

impl FromIterator<(FlatIndex, Map)> for Overlay {
    fn from_iter<I: IntoIterator<Item = (FlatIndex, Map)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
