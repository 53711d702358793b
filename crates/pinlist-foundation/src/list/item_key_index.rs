//! Position lookup for the current item keys.

use pinlist_core::collections::map::HashMap;
use pinlist_core::ItemKey;

/// Maps every item key of the latest snapshot to its position.
///
/// Rebuilt wholesale whenever a new snapshot arrives; lookups are O(1).
#[derive(Debug, Clone, Default)]
pub struct ItemKeyIndex {
    keys: Vec<ItemKey>,
    positions: HashMap<ItemKey, usize>,
}

impl ItemKeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: impl IntoIterator<Item = ItemKey>) -> Self {
        let mut index = Self::default();
        index.rebuild(keys.into_iter().collect());
        index
    }

    /// Replaces the index with `keys`.
    ///
    /// Keys are expected to be unique. When they are not, the last occurrence
    /// wins and a warning is logged.
    pub fn rebuild(&mut self, keys: Vec<ItemKey>) {
        self.positions.clear();
        self.positions.reserve(keys.len());
        let mut duplicates = 0usize;
        for (position, key) in keys.iter().enumerate() {
            if self.positions.insert(key.clone(), position).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            log::warn!(
                "item key index rebuilt with {duplicates} duplicate key(s) out of {}",
                keys.len()
            );
        }
        self.keys = keys;
    }

    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn key_at(&self, position: usize) -> Option<&ItemKey> {
        self.keys.get(position)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn keys(&self) -> &[ItemKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
