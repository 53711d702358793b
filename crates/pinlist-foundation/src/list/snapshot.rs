use pinlist_core::collections::map::HashSet;
use pinlist_core::ItemKey;

use super::config::PropValue;
use super::sticky::StickyEdge;
use crate::ListError;

const PROP_NAME: &str = "list-container-info";

/// Result of one diff pass: the ordered item keys and the ordinals flagged
/// sticky. A new snapshot replaces the previous one as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffSnapshot {
    pub item_keys: Vec<ItemKey>,
    pub sticky_top: Vec<usize>,
    pub sticky_bottom: Vec<usize>,
}

impl DiffSnapshot {
    pub fn new(item_keys: Vec<ItemKey>, sticky_top: Vec<usize>, sticky_bottom: Vec<usize>) -> Self {
        Self {
            item_keys,
            sticky_top,
            sticky_bottom,
        }
    }

    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        Self {
            item_keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_sticky_top(mut self, ordinals: impl Into<Vec<usize>>) -> Self {
        self.sticky_top = ordinals.into();
        self
    }

    pub fn with_sticky_bottom(mut self, ordinals: impl Into<Vec<usize>>) -> Self {
        self.sticky_bottom = ordinals.into();
        self
    }

    pub fn item_count(&self) -> usize {
        self.item_keys.len()
    }

    pub fn sticky_ordinals(&self, edge: StickyEdge) -> &[usize] {
        match edge {
            StickyEdge::Top => &self.sticky_top,
            StickyEdge::Bottom => &self.sticky_bottom,
        }
    }

    pub fn sticky_key_set(&self, edge: StickyEdge) -> StickyKeySet {
        StickyKeySet::derive(&self.item_keys, self.sticky_ordinals(edge))
    }

    /// Builds the snapshot carried by a `list-container-info` prop:
    /// `{ itemkeys, stickyTop, stickyBottom }`. Fields the prop leaves out
    /// keep their current value; negative ordinals are dropped.
    pub fn merged_with_prop(&self, value: &PropValue) -> Result<Self, ListError> {
        if !matches!(value, PropValue::Map(_)) {
            return Err(ListError::invalid_prop(PROP_NAME, "expected a map"));
        }
        let mut merged = self.clone();
        if let Some(keys) = value.get("itemkeys") {
            merged.item_keys = parse_keys(keys)?;
        }
        if let Some(ordinals) = value.get("stickyTop") {
            merged.sticky_top = parse_ordinals(ordinals)?;
        }
        if let Some(ordinals) = value.get("stickyBottom") {
            merged.sticky_bottom = parse_ordinals(ordinals)?;
        }
        Ok(merged)
    }
}

fn parse_keys(value: &PropValue) -> Result<Vec<ItemKey>, ListError> {
    let PropValue::Array(items) = value else {
        return Err(ListError::invalid_prop(PROP_NAME, "itemkeys must be an array"));
    };
    items
        .iter()
        .map(|item| match item {
            PropValue::String(key) => Ok(ItemKey::from(key.as_str())),
            _ => Err(ListError::invalid_prop(PROP_NAME, "item keys must be strings")),
        })
        .collect()
}

fn parse_ordinals(value: &PropValue) -> Result<Vec<usize>, ListError> {
    let PropValue::Array(items) = value else {
        return Err(ListError::invalid_prop(PROP_NAME, "sticky ordinals must be an array"));
    };
    let mut ordinals = Vec::with_capacity(items.len());
    for item in items {
        let Some(ordinal) = item.as_f64() else {
            return Err(ListError::invalid_prop(PROP_NAME, "sticky ordinals must be numbers"));
        };
        if ordinal >= 0.0 {
            ordinals.push(ordinal as usize);
        }
    }
    Ok(ordinals)
}

/// Keys sitting at the sticky ordinals of one edge.
#[derive(Debug, Clone, Default)]
pub struct StickyKeySet {
    keys: HashSet<ItemKey>,
}

impl StickyKeySet {
    /// Ordinals past the end of `item_keys` are ignored.
    pub fn derive(item_keys: &[ItemKey], ordinals: &[usize]) -> Self {
        let keys = ordinals
            .iter()
            .filter_map(|&ordinal| item_keys.get(ordinal).cloned())
            .collect();
        Self { keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
