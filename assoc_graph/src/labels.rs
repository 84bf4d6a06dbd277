//! Label ↔ dense index mapping for one label space.
//!
//! Indices are assigned in first-seen order starting at 0, with no gaps
//! and no reuse. `order[i]` is always the label whose index is `i`.

use std::collections::BTreeMap;

use crate::sequence::{GrowableSequence, Iter};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    indices: BTreeMap<String, usize>,
    order: GrowableSequence<String>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.order.get(index).ok().map(String::as_str)
    }

    /// Assign the next free index to `label`.
    /// The caller guarantees `label` is not already present.
    pub(crate) fn push(&mut self, label: String) -> usize {
        debug_assert!(!self.indices.contains_key(&label));
        let index = self.order.len();
        self.indices.insert(label.clone(), index);
        self.order.append(label);
        index
    }

    /// Labels in index order.
    pub fn iter(&self) -> Iter<'_, String> {
        self.order.iter()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.indices.iter().map(|(label, &index)| (label.as_str(), index))
    }
}
